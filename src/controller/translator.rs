use chrono::{DateTime, Local};
use tracing::{debug, info, trace};

use crate::controller::state::{AnalogAxis, ButtonState, Control, ControllerState};

/// Default stick dead zone used to decide whether motion is worth logging
pub const DEFAULT_LOG_DEADZONE: i16 = 8000;

// Raw input event with numeric axis/button indices
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    AxisMotion {
        axis: u8,
        value: i16,
        timestamp: DateTime<Local>,
    },
    ButtonTransition {
        button: u8,
        state: ButtonState,
        timestamp: DateTime<Local>,
    },
}

impl InputEvent {
    pub fn axis(axis: u8, value: i16) -> Self {
        InputEvent::AxisMotion {
            axis,
            value,
            timestamp: Local::now(),
        }
    }

    pub fn button_down(button: u8) -> Self {
        InputEvent::ButtonTransition {
            button,
            state: ButtonState::Pressed,
            timestamp: Local::now(),
        }
    }

    pub fn button_up(button: u8) -> Self {
        InputEvent::ButtonTransition {
            button,
            state: ButtonState::Released,
            timestamp: Local::now(),
        }
    }
}

/// What an event changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Axis(AnalogAxis),
    Button(Control, ButtonState),
    Ignored,
}

#[derive(Clone, Debug)]
pub struct TranslatorSettings {
    pub log_deadzone: i16,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            log_deadzone: DEFAULT_LOG_DEADZONE,
        }
    }
}

/// Applies input events to a [`ControllerState`].
///
/// Every event is either mapped onto exactly one field or ignored; the
/// translator has no failure mode.
#[derive(Clone, Debug, Default)]
pub struct EventTranslator {
    settings: TranslatorSettings,
}

impl EventTranslator {
    pub fn new(settings: TranslatorSettings) -> Self {
        debug!("Creating EventTranslator with settings: {:?}", settings);
        Self { settings }
    }

    pub fn apply(&self, state: &mut ControllerState, event: &InputEvent) -> Applied {
        match event {
            InputEvent::AxisMotion { axis, value, .. } => {
                let Some(logical) = AnalogAxis::from_index(*axis) else {
                    trace!("Ignoring unknown axis index {}", axis);
                    return Applied::Ignored;
                };

                // Stored unconditionally, the dead zone only gates logging
                if !logical.is_trigger() && value.unsigned_abs() > self.settings.log_deadzone.unsigned_abs() {
                    debug!("{:?} outside dead zone: {}", logical, value);
                }

                state.set_axis(logical, *value);
                Applied::Axis(logical)
            }
            InputEvent::ButtonTransition {
                button,
                state: button_state,
                timestamp,
            } => {
                let Some(control) = Control::from_index(*button) else {
                    trace!("Ignoring unknown button index {}", button);
                    return Applied::Ignored;
                };

                info!(
                    "Button event: {:?} {:?} at {}",
                    control,
                    button_state,
                    timestamp.format("%H:%M:%S.%3f")
                );
                state.set_button(control, *button_state);
                Applied::Button(control, *button_state)
            }
        }
    }

    /// Pure form of [`EventTranslator::apply`]
    pub fn translate(&self, mut state: ControllerState, event: &InputEvent) -> ControllerState {
        self.apply(&mut state, event);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_event_sets_only_its_field() {
        let translator = EventTranslator::default();
        for axis in AnalogAxis::ALL {
            let before = ControllerState::new();
            let after = translator.translate(before.clone(), &InputEvent::axis(axis.index(), 12345));

            for other in AnalogAxis::ALL {
                let expected = if other == axis { 12345 } else { 0 };
                assert_eq!(after.axis(other), expected, "axis {:?} after moving {:?}", other, axis);
            }
            for control in Control::ALL {
                assert_eq!(after.button(control), before.button(control));
            }
        }
    }

    #[test]
    fn test_left_x_scenario() {
        let translator = EventTranslator::default();
        let mut state = ControllerState::new();

        let applied = translator.apply(&mut state, &InputEvent::axis(0, 20000));

        assert_eq!(applied, Applied::Axis(AnalogAxis::LeftX));
        let mut expected = ControllerState::new();
        expected.left_x = 20000;
        assert_eq!(state, expected);
    }

    #[test]
    fn test_axis_values_inside_deadzone_are_still_stored() {
        let translator = EventTranslator::default();
        let mut state = ControllerState::new();
        translator.apply(&mut state, &InputEvent::axis(4, -10));
        assert_eq!(state.right_y, -10);
    }

    #[test]
    fn test_last_axis_write_wins() {
        let translator = EventTranslator::default();
        let mut state = ControllerState::new();
        translator.apply(&mut state, &InputEvent::axis(1, 30000));
        translator.apply(&mut state, &InputEvent::axis(1, -42));
        assert_eq!(state.left_y, -42);
    }

    #[test]
    fn test_button_down_then_up() {
        let translator = EventTranslator::default();
        let mut state = ControllerState::new();

        translator.apply(&mut state, &InputEvent::button_down(0));
        assert_eq!(state.a, ButtonState::Pressed);

        translator.apply(&mut state, &InputEvent::button_up(0));
        assert_eq!(state.a, ButtonState::Released);
        assert_eq!(state, ControllerState::new());
    }

    #[test]
    fn test_every_button_index_round_trips() {
        let translator = EventTranslator::default();
        for control in Control::ALL {
            let mut state = ControllerState::new();
            let applied = translator.apply(&mut state, &InputEvent::button_down(control.index()));
            assert_eq!(applied, Applied::Button(control, ButtonState::Pressed));
            assert!(state.is_pressed(control));

            translator.apply(&mut state, &InputEvent::button_up(control.index()));
            assert!(!state.is_pressed(control));
        }
    }

    #[test]
    fn test_unknown_indices_leave_state_unchanged() {
        let translator = EventTranslator::default();
        let mut state = ControllerState::new();
        state.left_x = 77;
        state.start = ButtonState::Pressed;
        let before = state.clone();

        assert_eq!(translator.apply(&mut state, &InputEvent::axis(6, 1000)), Applied::Ignored);
        assert_eq!(translator.apply(&mut state, &InputEvent::axis(200, -1)), Applied::Ignored);
        assert_eq!(translator.apply(&mut state, &InputEvent::button_down(15)), Applied::Ignored);
        assert_eq!(translator.apply(&mut state, &InputEvent::button_up(99)), Applied::Ignored);

        assert_eq!(state, before);
    }
}
