//! Animation controller: parameters plus an ordered list of layers, each
//! owning a two-state machine.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::clip::{ClipRef, ToggleState};
use crate::models::parameter::ControllerParameter;

/// How a condition reads its boolean parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionMode {
    /// Holds when the parameter is true
    If,
    /// Holds when the parameter is false
    IfNot,
}

/// Single guard on a transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Comparison mode
    pub mode: ConditionMode,
    /// Threshold, unused for boolean modes but stored as 0
    pub threshold: f32,
    /// Parameter name, referenced by string only
    pub parameter: String,
}

impl Condition {
    /// Evaluates the guard. Unknown parameters read as false.
    #[must_use]
    pub fn holds(&self, values: &ParameterValues) -> bool {
        let value = values.get(&self.parameter);
        match self.mode {
            ConditionMode::If => value,
            ConditionMode::IfNot => !value,
        }
    }
}

/// Directed edge between two states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// State the edge leaves
    pub source: ToggleState,
    /// State the edge enters
    pub destination: ToggleState,
    /// Whether the source must play to `exit_time` before leaving
    pub has_exit_time: bool,
    /// Whether `duration` is in seconds rather than normalized time
    pub has_fixed_duration: bool,
    /// Blend duration
    pub duration: f32,
    /// Exit time (normalized)
    pub exit_time: f32,
    /// All must hold for the edge to fire
    pub conditions: Vec<Condition>,
}

impl StateTransition {
    /// Returns true if every condition holds.
    #[must_use]
    pub fn fires(&self, values: &ParameterValues) -> bool {
        self.conditions.iter().all(|c| c.holds(values))
    }
}

/// A state and the clip it plays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimatorState {
    /// Which toggle state this is
    pub id: ToggleState,
    /// Clip played while in this state
    pub motion: ClipRef,
}

/// Two-state machine driving one toggle layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMachine {
    /// Machine name, e.g. `Hat_SM`
    pub name: String,
    /// States in creation order
    pub states: Vec<AnimatorState>,
    /// Initial state
    pub default_state: ToggleState,
    /// Edges in creation order
    pub transitions: Vec<StateTransition>,
}

impl StateMachine {
    /// Creates an empty machine.
    pub fn new(name: impl Into<String>, default_state: ToggleState) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            default_state,
            transitions: Vec::new(),
        }
    }

    /// Adds a state bound to `motion`, replacing an existing one with the same id.
    pub fn add_state(&mut self, id: ToggleState, motion: ClipRef) {
        if let Some(existing) = self.states.iter_mut().find(|s| s.id == id) {
            existing.motion = motion;
        } else {
            self.states.push(AnimatorState { id, motion });
        }
    }

    /// Looks up a state.
    #[must_use]
    pub fn state(&self, id: ToggleState) -> Option<&AnimatorState> {
        self.states.iter().find(|s| s.id == id)
    }

    /// Appends an edge.
    pub fn add_transition(&mut self, transition: StateTransition) {
        self.transitions.push(transition);
    }

    /// Outgoing edges of `state`.
    pub fn transitions_from(&self, state: ToggleState) -> impl Iterator<Item = &StateTransition> {
        self.transitions.iter().filter(move |t| t.source == state)
    }

    /// Advances the machine by one evaluation.
    ///
    /// Takes the first outgoing edge of `current` whose conditions hold, or
    /// stays in `current` when none does.
    #[must_use]
    pub fn step(&self, current: ToggleState, values: &ParameterValues) -> ToggleState {
        self.transitions_from(current)
            .find(|t| t.fires(values))
            .map_or(current, |t| t.destination)
    }
}

/// Layer wrapping one state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerLayer {
    /// Layer name, e.g. `Hat_Toggle`
    pub name: String,
    /// Blend weight
    pub default_weight: f32,
    /// The layer's machine
    pub state_machine: StateMachine,
}

/// Animation controller document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimatorController {
    /// Controller name
    pub name: String,
    /// Parameters keyed by name, in declaration order
    #[serde(default)]
    pub parameters: IndexMap<String, ControllerParameter>,
    /// Layers in evaluation order
    #[serde(default)]
    pub layers: Vec<ControllerLayer>,
}

impl AnimatorController {
    /// Creates an empty controller.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Looks up a parameter.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ControllerParameter> {
        self.parameters.get(name)
    }

    /// Appends a layer. Layers are never deduplicated.
    pub fn add_layer(&mut self, layer: ControllerLayer) -> usize {
        self.layers.push(layer);
        self.layers.len() - 1
    }

    /// All layers with the given name, in order.
    pub fn layers_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ControllerLayer> {
        self.layers.iter().filter(move |l| l.name == name)
    }
}

/// Runtime boolean parameter values used to evaluate state machines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterValues {
    values: HashMap<String, bool>,
}

impl ParameterValues {
    /// Creates an empty set (every parameter reads as false).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value.
    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        self.values.insert(name.into(), value);
    }

    /// Builder form of [`ParameterValues::set`].
    pub fn with(mut self, name: impl Into<String>, value: bool) -> Self {
        self.set(name, value);
        self
    }

    /// Reads a value, defaulting to false.
    #[must_use]
    pub fn get(&self, name: &str) -> bool {
        self.values.get(name).copied().unwrap_or(false)
    }
}
