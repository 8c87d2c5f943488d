//! Parameter registration into the two independent registries.
//!
//! Registration is a union by name: an existing record always wins, even
//! when its kind or default differ from what would have been added. The
//! controller and the exposed list are checked separately, so they can
//! drift apart and nothing here tries to reconcile them.

use tracing::{debug, info, warn};

use crate::constants::TOGGLE_SUFFIX;
use crate::models::{
    bool_default, AnimatorController, ControllerParameter, ExposedParameter, ExposedParameters,
    ParameterKind,
};

/// Builds the parameter name for a target, e.g. `Hat` → `Hat_Toggle`.
pub fn toggle_parameter_name(target_name: &str) -> String {
    format!("{target_name}{TOGGLE_SUFFIX}")
}

/// Outcome of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// A new boolean record was appended
    Added,
    /// A record with that name already existed and was left untouched
    Existing {
        /// Kind of the record that was kept
        kind: ParameterKind,
    },
}

impl Registration {
    /// Returns true if a record was appended.
    #[must_use]
    pub const fn is_added(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// A name-keyed parameter store.
pub trait ParameterRegistry {
    /// Short store name used in log lines.
    fn registry_name(&self) -> &str;

    /// Kind of the record named `name`, if any.
    fn existing_kind(&self, name: &str) -> Option<ParameterKind>;

    /// Appends a boolean record. Only called when `name` is absent.
    fn append_bool(&mut self, name: &str, default_on: bool);
}

impl ParameterRegistry for AnimatorController {
    fn registry_name(&self) -> &str {
        &self.name
    }

    fn existing_kind(&self, name: &str) -> Option<ParameterKind> {
        self.parameters.get(name).map(|p| p.kind)
    }

    fn append_bool(&mut self, name: &str, default_on: bool) {
        self.parameters.insert(
            name.to_string(),
            ControllerParameter {
                kind: ParameterKind::Bool,
                default_value: bool_default(default_on),
            },
        );
    }
}

impl ParameterRegistry for ExposedParameters {
    fn registry_name(&self) -> &str {
        &self.name
    }

    fn existing_kind(&self, name: &str) -> Option<ParameterKind> {
        self.parameters.get(name).map(|p| p.value_kind)
    }

    fn append_bool(&mut self, name: &str, default_on: bool) {
        self.parameters.insert(
            name.to_string(),
            ExposedParameter {
                value_kind: ParameterKind::Bool,
                default_value: bool_default(default_on),
                persisted: true,
            },
        );
    }
}

/// Adds a boolean parameter to `registry` unless the name is taken.
pub fn register_toggle_parameter<R: ParameterRegistry + ?Sized>(
    registry: &mut R,
    name: &str,
    default_on: bool,
) -> Registration {
    if let Some(kind) = registry.existing_kind(name) {
        if kind == ParameterKind::Bool {
            debug!("{}: parameter {} already present", registry.registry_name(), name);
        } else {
            warn!(
                "{}: parameter {} already present as {:?}, keeping it",
                registry.registry_name(),
                name,
                kind
            );
        }
        return Registration::Existing { kind };
    }

    registry.append_bool(name, default_on);
    info!(
        "{}: added parameter {} (default {})",
        registry.registry_name(),
        name,
        default_on
    );
    Registration::Added
}
