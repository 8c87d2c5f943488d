//! Togglegen Library
//!
//! Batch generation of visibility toggles: constant on/off clips, a
//! two-state layer per target in an animation controller, boolean
//! parameters in both the controller and the exposed parameter list, and a
//! paginated menu of toggle controls.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod services;
pub mod store;
