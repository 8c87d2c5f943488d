//! Layer composition: one state machine and one layer per toggle target.

use tracing::info;

use crate::constants::{STATE_MACHINE_SUFFIX, TOGGLE_SUFFIX};
use crate::models::{AnimatorController, ClipRef, ControllerLayer, StateMachine, ToggleState};
use crate::services::transitions::wire_toggle;

/// Blend weight given to generated layers.
pub const LAYER_WEIGHT: f32 = 1.0;

/// Appends a toggle layer for `base_name` to `controller`.
///
/// The layer is named `<base_name>_Toggle` and its transitions read the
/// parameter of the same name. Layers are appended unconditionally, so
/// calling this twice for one name yields two layers.
///
/// Returns the index of the new layer.
pub fn compose_layer(
    controller: &mut AnimatorController,
    base_name: &str,
    on_clip: ClipRef,
    off_clip: ClipRef,
    default_on: bool,
) -> usize {
    let toggle_name = format!("{base_name}{TOGGLE_SUFFIX}");

    let mut state_machine = StateMachine::new(
        format!("{base_name}{STATE_MACHINE_SUFFIX}"),
        ToggleState::from_bool(default_on),
    );
    state_machine.add_state(ToggleState::On, on_clip);
    state_machine.add_state(ToggleState::Off, off_clip);
    wire_toggle(&mut state_machine, &toggle_name);

    let index = controller.add_layer(ControllerLayer {
        name: toggle_name.clone(),
        default_weight: LAYER_WEIGHT,
        state_machine,
    });

    info!(
        "Layer {} created. Default = {}",
        toggle_name,
        if default_on { "ON" } else { "OFF" }
    );

    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParameterValues;

    fn clip(name: &str) -> ClipRef {
        ClipRef {
            name: name.to_string(),
            location: format!("clips/{name}.clip.json"),
        }
    }

    #[test]
    fn test_compose_layer_structure() {
        let mut controller = AnimatorController::new("FX");
        let index = compose_layer(&mut controller, "Hat", clip("Hat_On"), clip("Hat_Off"), false);

        let layer = &controller.layers[index];
        assert_eq!(layer.name, "Hat_Toggle");
        assert_eq!(layer.default_weight, 1.0);

        let sm = &layer.state_machine;
        assert_eq!(sm.name, "Hat_SM");
        assert_eq!(sm.default_state, ToggleState::Off);
        assert_eq!(sm.state(ToggleState::On).unwrap().motion.name, "Hat_On");
        assert_eq!(sm.state(ToggleState::Off).unwrap().motion.name, "Hat_Off");
        assert_eq!(sm.transitions.len(), 2);
        assert!(sm
            .transitions
            .iter()
            .all(|t| t.conditions[0].parameter == "Hat_Toggle"));
    }

    #[test]
    fn test_default_on_starts_on_and_exits_when_cleared() {
        let mut controller = AnimatorController::new("FX");
        compose_layer(&mut controller, "Cape", clip("Cape_On"), clip("Cape_Off"), true);

        let sm = &controller.layers[0].state_machine;
        assert_eq!(sm.default_state, ToggleState::On);

        let cleared = ParameterValues::new().with("Cape_Toggle", false);
        assert_eq!(sm.step(sm.default_state, &cleared), ToggleState::Off);
    }

    #[test]
    fn test_compose_twice_duplicates_layer() {
        let mut controller = AnimatorController::new("FX");
        compose_layer(&mut controller, "Hat", clip("Hat_On"), clip("Hat_Off"), false);
        compose_layer(&mut controller, "Hat", clip("Hat_On"), clip("Hat_Off"), true);

        assert_eq!(controller.layers.len(), 2);
        assert_eq!(controller.layers_named("Hat_Toggle").count(), 2);
        // parameters are the registrar's job
        assert!(controller.parameters.is_empty());
    }
}
