//! Point-in-time snapshot of a single gamepad.
//!
//! Holds the last observed value of every analog axis and the pressed state of
//! every digital control. There is no history: each event overwrites its field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pressed state of a digital control
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonState {
    Pressed,
    #[default]
    Released,
}

impl ButtonState {
    pub fn is_pressed(self) -> bool {
        matches!(self, ButtonState::Pressed)
    }
}

/// Digital controls, numbered by the standard button index table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Control {
    A,
    B,
    X,
    Y,
    LeftBumper,
    RightBumper,
    LeftStick,
    RightStick,
    Start,
    Back,
    Guide,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl Control {
    /// Every control in index order
    pub const ALL: [Control; 15] = [
        Control::A,
        Control::B,
        Control::X,
        Control::Y,
        Control::LeftBumper,
        Control::RightBumper,
        Control::LeftStick,
        Control::RightStick,
        Control::Start,
        Control::Back,
        Control::Guide,
        Control::DPadUp,
        Control::DPadDown,
        Control::DPadLeft,
        Control::DPadRight,
    ];

    pub fn from_index(index: u8) -> Option<Control> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        match self {
            Control::A => 0,
            Control::B => 1,
            Control::X => 2,
            Control::Y => 3,
            Control::LeftBumper => 4,
            Control::RightBumper => 5,
            Control::LeftStick => 6,
            Control::RightStick => 7,
            Control::Start => 8,
            Control::Back => 9,
            Control::Guide => 10,
            Control::DPadUp => 11,
            Control::DPadDown => 12,
            Control::DPadLeft => 13,
            Control::DPadRight => 14,
        }
    }

    /// Base name used for asset files and texture names
    pub fn asset_name(self) -> &'static str {
        match self {
            Control::A => "a",
            Control::B => "b",
            Control::X => "x",
            Control::Y => "y",
            Control::LeftBumper => "left_bumper",
            Control::RightBumper => "right_bumper",
            Control::LeftStick => "left_stick",
            Control::RightStick => "right_stick",
            Control::Start => "start",
            Control::Back => "back",
            Control::Guide => "guide",
            Control::DPadUp => "dpad_up",
            Control::DPadDown => "dpad_down",
            Control::DPadLeft => "dpad_left",
            Control::DPadRight => "dpad_right",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.asset_name())
    }
}

/// Analog axes, numbered by the standard axis index table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalogAxis {
    LeftX,
    LeftY,
    LeftTrigger,
    RightX,
    RightY,
    RightTrigger,
}

impl AnalogAxis {
    pub const ALL: [AnalogAxis; 6] = [
        AnalogAxis::LeftX,
        AnalogAxis::LeftY,
        AnalogAxis::LeftTrigger,
        AnalogAxis::RightX,
        AnalogAxis::RightY,
        AnalogAxis::RightTrigger,
    ];

    pub fn from_index(index: u8) -> Option<AnalogAxis> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        match self {
            AnalogAxis::LeftX => 0,
            AnalogAxis::LeftY => 1,
            AnalogAxis::LeftTrigger => 2,
            AnalogAxis::RightX => 3,
            AnalogAxis::RightY => 4,
            AnalogAxis::RightTrigger => 5,
        }
    }

    pub fn is_trigger(self) -> bool {
        matches!(self, AnalogAxis::LeftTrigger | AnalogAxis::RightTrigger)
    }
}

/// Current state of every control on the active gamepad.
///
/// Stick values use the screen convention: positive X is right, positive Y is down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub left_x: i16,
    pub left_y: i16,
    pub right_x: i16,
    pub right_y: i16,

    pub left_trigger: u16,
    pub right_trigger: u16,

    pub a: ButtonState,
    pub b: ButtonState,
    pub x: ButtonState,
    pub y: ButtonState,
    pub left_bumper: ButtonState,
    pub right_bumper: ButtonState,
    pub left_stick: ButtonState,
    pub right_stick: ButtonState,
    pub start: ButtonState,
    pub back: ButtonState,
    pub guide: ButtonState,
    pub dpad_up: ButtonState,
    pub dpad_down: ButtonState,
    pub dpad_left: ButtonState,
    pub dpad_right: ButtonState,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis(&self, axis: AnalogAxis) -> i32 {
        match axis {
            AnalogAxis::LeftX => self.left_x as i32,
            AnalogAxis::LeftY => self.left_y as i32,
            AnalogAxis::LeftTrigger => self.left_trigger as i32,
            AnalogAxis::RightX => self.right_x as i32,
            AnalogAxis::RightY => self.right_y as i32,
            AnalogAxis::RightTrigger => self.right_trigger as i32,
        }
    }

    /// Overwrites one axis. Trigger axes never go below zero.
    pub fn set_axis(&mut self, axis: AnalogAxis, value: i16) {
        match axis {
            AnalogAxis::LeftX => self.left_x = value,
            AnalogAxis::LeftY => self.left_y = value,
            AnalogAxis::LeftTrigger => self.left_trigger = value.max(0) as u16,
            AnalogAxis::RightX => self.right_x = value,
            AnalogAxis::RightY => self.right_y = value,
            AnalogAxis::RightTrigger => self.right_trigger = value.max(0) as u16,
        }
    }

    pub fn button(&self, control: Control) -> ButtonState {
        match control {
            Control::A => self.a,
            Control::B => self.b,
            Control::X => self.x,
            Control::Y => self.y,
            Control::LeftBumper => self.left_bumper,
            Control::RightBumper => self.right_bumper,
            Control::LeftStick => self.left_stick,
            Control::RightStick => self.right_stick,
            Control::Start => self.start,
            Control::Back => self.back,
            Control::Guide => self.guide,
            Control::DPadUp => self.dpad_up,
            Control::DPadDown => self.dpad_down,
            Control::DPadLeft => self.dpad_left,
            Control::DPadRight => self.dpad_right,
        }
    }

    pub fn is_pressed(&self, control: Control) -> bool {
        self.button(control).is_pressed()
    }

    pub fn set_button(&mut self, control: Control, state: ButtonState) {
        let slot = match control {
            Control::A => &mut self.a,
            Control::B => &mut self.b,
            Control::X => &mut self.x,
            Control::Y => &mut self.y,
            Control::LeftBumper => &mut self.left_bumper,
            Control::RightBumper => &mut self.right_bumper,
            Control::LeftStick => &mut self.left_stick,
            Control::RightStick => &mut self.right_stick,
            Control::Start => &mut self.start,
            Control::Back => &mut self.back,
            Control::Guide => &mut self.guide,
            Control::DPadUp => &mut self.dpad_up,
            Control::DPadDown => &mut self.dpad_down,
            Control::DPadLeft => &mut self.dpad_left,
            Control::DPadRight => &mut self.dpad_right,
        };
        *slot = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_centered_and_released() {
        let state = ControllerState::new();
        for axis in AnalogAxis::ALL {
            assert_eq!(state.axis(axis), 0);
        }
        for control in Control::ALL {
            assert_eq!(state.button(control), ButtonState::Released);
        }
    }

    #[test]
    fn test_control_index_table_round_trips() {
        for (i, control) in Control::ALL.iter().enumerate() {
            assert_eq!(control.index() as usize, i);
            assert_eq!(Control::from_index(i as u8), Some(*control));
        }
        assert_eq!(Control::from_index(15), None);
        assert_eq!(Control::from_index(u8::MAX), None);
    }

    #[test]
    fn test_axis_index_table() {
        assert_eq!(AnalogAxis::from_index(0), Some(AnalogAxis::LeftX));
        assert_eq!(AnalogAxis::from_index(1), Some(AnalogAxis::LeftY));
        assert_eq!(AnalogAxis::from_index(2), Some(AnalogAxis::LeftTrigger));
        assert_eq!(AnalogAxis::from_index(3), Some(AnalogAxis::RightX));
        assert_eq!(AnalogAxis::from_index(4), Some(AnalogAxis::RightY));
        assert_eq!(AnalogAxis::from_index(5), Some(AnalogAxis::RightTrigger));
        assert_eq!(AnalogAxis::from_index(6), None);
        for axis in AnalogAxis::ALL {
            assert_eq!(AnalogAxis::from_index(axis.index()), Some(axis));
        }
    }

    #[test]
    fn test_set_button_touches_only_that_control() {
        let mut state = ControllerState::new();
        state.set_button(Control::DPadLeft, ButtonState::Pressed);
        for control in Control::ALL {
            assert_eq!(state.is_pressed(control), control == Control::DPadLeft);
        }
    }

    #[test]
    fn test_trigger_clamps_negative_values() {
        let mut state = ControllerState::new();
        state.set_axis(AnalogAxis::RightTrigger, -500);
        assert_eq!(state.right_trigger, 0);
        state.set_axis(AnalogAxis::RightTrigger, i16::MAX);
        assert_eq!(state.right_trigger, 32767);
    }
}
