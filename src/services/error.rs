//! Errors produced while generating toggles.

use serde::Serialize;
use thiserror::Error;

/// Possible errors that can be produced by toggle generation.
///
/// `MissingDestination` is structural and aborts a run before anything is
/// mutated. Every other variant is scoped to a single entry.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationError {
    /// Path computation attempted without a root
    #[error("Root object is not set; cannot compute the path of '{target}'")]
    MissingRoot { target: String },
    /// Target lies outside the root's hierarchy
    #[error("'{target}' is not a descendant of root '{root}'")]
    TargetOutsideRoot { target: String, root: String },
    /// An object on the path cannot be used as a file or path component
    #[error("'{target}' has an unusable object name '{segment}' on its path")]
    InvalidObjectName { target: String, segment: String },
    /// Absent slot in the toggle list
    #[error("Entry {index} has no target object")]
    InvalidTarget { index: usize },
    /// Every menu page is full
    #[error("No menu page has room for '{label}' ({pages} pages of {capacity})")]
    PageOverflow {
        label: String,
        pages: usize,
        capacity: usize,
    },
    /// Clip or menu folder missing
    #[error("No {destination} destination folder configured")]
    MissingDestination { destination: String },
    /// Persisting an artifact failed
    #[error("Asset store failure: {message}")]
    Store { message: String },
}

impl GenerationError {
    /// Wraps a store failure, keeping the full context chain.
    pub fn store(err: &anyhow::Error) -> Self {
        Self::Store {
            message: format!("{err:#}"),
        }
    }

    /// Returns true for errors that abort the whole run.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::MissingDestination { .. })
    }
}
