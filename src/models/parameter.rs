//! Parameter records for the controller and exposed-parameter registries.
//!
//! Both registries are keyed by parameter name. They are independent: nothing
//! keeps them in sync, and a name may exist in one and not the other.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ParameterKind {
    /// true/false
    #[default]
    Bool,
    /// Integer
    Int,
    /// Floating point
    Float,
    /// One-shot trigger (controller only)
    Trigger,
}

/// Maps a boolean default to its stored numeric form.
#[must_use]
pub const fn bool_default(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

/// Parameter declared on an animation controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerParameter {
    /// Value type
    pub kind: ParameterKind,
    /// Default value (0.0/1.0 for booleans)
    #[serde(default)]
    pub default_value: f32,
}

/// Parameter in the exposed-parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposedParameter {
    /// Value type
    pub value_kind: ParameterKind,
    /// Default value (0.0/1.0 for booleans)
    #[serde(default)]
    pub default_value: f32,
    /// Whether the value survives between sessions
    #[serde(default)]
    pub persisted: bool,
}

/// Exposed-parameter list, stored as its own document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExposedParameters {
    /// Asset name, referenced by menu pages
    pub name: String,
    /// Parameters keyed by name, in declaration order
    #[serde(default)]
    pub parameters: IndexMap<String, ExposedParameter>,
}

impl ExposedParameters {
    /// Creates an empty list.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: IndexMap::new(),
        }
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ExposedParameter> {
        self.parameters.get(name)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns true if no parameters are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}
