//! Transition wiring for the On/Off toggle machine.

use crate::models::{Condition, ConditionMode, StateMachine, StateTransition, ToggleState};

/// Builds an immediate, condition-gated edge.
///
/// The edge has no exit time, zero duration and a single condition
/// `parameter <mode> 0`.
pub fn build_transition(
    source: ToggleState,
    destination: ToggleState,
    mode: ConditionMode,
    parameter: &str,
) -> StateTransition {
    StateTransition {
        source,
        destination,
        has_exit_time: false,
        has_fixed_duration: false,
        duration: 0.0,
        exit_time: 0.0,
        conditions: vec![Condition {
            mode,
            threshold: 0.0,
            parameter: parameter.to_string(),
        }],
    }
}

/// Adds the two edges of a toggle: Off→On when `parameter` is true and
/// On→Off when it is false.
pub fn wire_toggle(state_machine: &mut StateMachine, parameter: &str) {
    state_machine.add_transition(build_transition(
        ToggleState::Off,
        ToggleState::On,
        ConditionMode::If,
        parameter,
    ));
    state_machine.add_transition(build_transition(
        ToggleState::On,
        ToggleState::Off,
        ConditionMode::IfNot,
        parameter,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParameterValues;

    #[test]
    fn test_build_transition_is_immediate() {
        let t = build_transition(ToggleState::Off, ToggleState::On, ConditionMode::If, "Hat_Toggle");

        assert!(!t.has_exit_time);
        assert!(!t.has_fixed_duration);
        assert_eq!(t.duration, 0.0);
        assert_eq!(t.exit_time, 0.0);
        assert_eq!(t.conditions.len(), 1);
        assert_eq!(t.conditions[0].mode, ConditionMode::If);
        assert_eq!(t.conditions[0].threshold, 0.0);
        assert_eq!(t.conditions[0].parameter, "Hat_Toggle");
    }

    #[test]
    fn test_wire_toggle_creates_bistable_cycle() {
        let mut sm = StateMachine::new("Hat_SM", ToggleState::Off);
        wire_toggle(&mut sm, "Hat_Toggle");

        assert_eq!(sm.transitions.len(), 2);
        assert_eq!(sm.transitions_from(ToggleState::Off).count(), 1);
        assert_eq!(sm.transitions_from(ToggleState::On).count(), 1);

        let on = ParameterValues::new().with("Hat_Toggle", true);
        let off = ParameterValues::new().with("Hat_Toggle", false);

        assert_eq!(sm.step(ToggleState::Off, &on), ToggleState::On);
        assert_eq!(sm.step(ToggleState::On, &on), ToggleState::On);
        assert_eq!(sm.step(ToggleState::On, &off), ToggleState::Off);
        assert_eq!(sm.step(ToggleState::Off, &off), ToggleState::Off);
    }
}
