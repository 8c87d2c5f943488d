//! CLI command handlers for Togglegen.
//!
//! Headless, scriptable access to toggle generation for automation and CI.

pub mod common;
pub mod config;
pub mod generate;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use generate::{GenerateArgs, SourceArgs};
pub use validate::ValidateArgs;
