//! Service layer for toggle generation.
//!
//! Each stage of a run lives in its own module; [`generator`] wires them
//! together and [`documents`] handles file I/O for the CLI.

pub mod clips;
pub mod documents;
pub mod error;
pub mod generator;
pub mod layers;
pub mod menus;
pub mod parameters;
pub mod transitions;

// Re-export commonly used types and functions
pub use clips::synthesize_clip;
pub use documents::DocumentService;
pub use error::GenerationError;
pub use generator::{
    EntryCheck, EntryOutcome, GenerationOptions, GenerationReport, ToggleGenerator,
};
pub use layers::{compose_layer, LAYER_WEIGHT};
pub use menus::{page_count, MenuPaginator};
pub use parameters::{register_toggle_parameter, toggle_parameter_name, ParameterRegistry, Registration};
pub use transitions::{build_transition, wire_toggle};
