use gilrs::ev::filter::axis_dpad_to_button;
use gilrs::{Axis, Button, Event, EventType, Filter, Gamepad, GamepadId, Gilrs, GilrsBuilder};
use statum::{machine, state};
use tracing::{debug, error, info, trace, warn};

use crate::controller::state::{AnalogAxis, Control};
use crate::controller::translator::InputEvent;

const AXIS_SCALE: f32 = 32767.0;

const REPORTED_AXES: [Axis; 8] = [
    Axis::LeftStickX,
    Axis::LeftStickY,
    Axis::LeftZ,
    Axis::RightStickX,
    Axis::RightStickY,
    Axis::RightZ,
    Axis::DPadX,
    Axis::DPadY,
];

const REPORTED_BUTTONS: [Button; 19] = [
    Button::South,
    Button::East,
    Button::North,
    Button::West,
    Button::C,
    Button::Z,
    Button::LeftTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::Mode,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
];

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Failed to initialize input backend: {0}")]
    Backend(String),

    #[error("No joysticks connected")]
    NoDevice,
}

#[state]
#[derive(Debug, Clone)]
pub enum SourceState {
    Initializing,
    Polling,
}

/// Gamepad backend adapter producing indexed [`InputEvent`]s.
///
/// Created in `Initializing`, moves to `Polling` once a device is selected.
#[machine]
#[derive(Debug)]
pub struct InputSource<S: SourceState> {
    gilrs: Gilrs,

    // First connected device at startup, never re-selected
    active_gamepad: Option<GamepadId>,

    device_name: String,
}

impl InputSource<Initializing> {
    pub fn create() -> Result<Self, InputError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match backend_builder().build() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(InputError::Backend(e.to_string()));
            }
        };

        Ok(Self::new(gilrs, None, String::new()))
    }

    /// Selects the first connected gamepad and transitions to `Polling`
    pub fn open_first(mut self) -> Result<InputSource<Polling>, InputError> {
        let gamepads: Vec<(GamepadId, Gamepad<'_>)> = self.gilrs.gamepads().collect();

        if gamepads.is_empty() {
            warn!("Warning: No joysticks connected!");
            return Err(InputError::NoDevice);
        }

        info!("Found {} gamepads:", gamepads.len());
        for (idx, (id, gamepad)) in gamepads.iter().enumerate() {
            info!(
                "  [{}] ID: {}, Name: {}, UUID: {:?}",
                idx,
                id,
                gamepad.name(),
                gamepad.uuid()
            );
        }

        let (id, gamepad) = &gamepads[0];
        let id = *id;
        let name = gamepad.name().to_string();
        let axes = REPORTED_AXES.iter().filter(|a| gamepad.axis_code(**a).is_some()).count();
        let buttons = REPORTED_BUTTONS
            .iter()
            .filter(|b| gamepad.button_code(**b).is_some())
            .count();
        info!(
            "Joystick found with {} axes and {} buttons: {} ({}), mapping source {:?}",
            axes,
            buttons,
            name,
            id,
            gamepad.mapping_source()
        );
        drop(gamepads);

        self.active_gamepad = Some(id);
        self.device_name = name;
        Ok(self.transition())
    }
}

impl InputSource<Polling> {
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Drains every queued backend event without blocking
    pub fn drain(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        while let Some(Event { id, event, .. }) = self
            .gilrs
            .next_event()
            .filter_ev(&axis_dpad_to_button, &mut self.gilrs)
        {
            if self.active_gamepad != Some(id) {
                trace!("Skipping event from non-active gamepad: {:?}", id);
                continue;
            }

            match event {
                EventType::Connected => info!("Controller connected event detected"),
                EventType::Dropped => {}
                EventType::Disconnected => {
                    warn!("Controller {} disconnected, keeping last state", self.device_name)
                }
                other => {
                    if let Some(input) = convert_gilrs_event(other) {
                        events.push(input);
                    }
                }
            }
        }

        if !events.is_empty() {
            debug!("Drained {} input events", events.len());
        }
        events
    }
}

/// gilrs without its default jitter and dead zone filters, so every axis value
/// reaches the state as reported. D-pad hats are still turned into buttons by
/// [`axis_dpad_to_button`] in [`InputSource::drain`].
fn backend_builder() -> GilrsBuilder {
    GilrsBuilder::new().with_default_filters(false)
}

fn convert_gilrs_event(event: EventType) -> Option<InputEvent> {
    match event {
        EventType::AxisChanged(axis, value, _) => convert_axis(axis, value),
        EventType::ButtonChanged(button, value, _) => convert_analog_button(button, value),
        EventType::ButtonPressed(button, _) => convert_button(button, true),
        EventType::ButtonReleased(button, _) => convert_button(button, false),
        _ => {
            trace!("Unhandled event type: {:?}", event);
            None
        }
    }
}

fn convert_axis(axis: Axis, value: f32) -> Option<InputEvent> {
    let logical = map_axis(axis)?;
    Some(InputEvent::axis(logical.index(), scale_axis(logical, value)))
}

// Analog triggers arrive as button value changes
fn convert_analog_button(button: Button, value: f32) -> Option<InputEvent> {
    let logical = match button {
        Button::LeftTrigger2 => AnalogAxis::LeftTrigger,
        Button::RightTrigger2 => AnalogAxis::RightTrigger,
        _ => return None,
    };
    Some(InputEvent::axis(logical.index(), scale_axis(logical, value)))
}

fn convert_button(button: Button, pressed: bool) -> Option<InputEvent> {
    let control = map_button(button)?;
    Some(if pressed {
        InputEvent::button_down(control.index())
    } else {
        InputEvent::button_up(control.index())
    })
}

fn map_axis(axis: Axis) -> Option<AnalogAxis> {
    match axis {
        Axis::LeftStickX => Some(AnalogAxis::LeftX),
        Axis::LeftStickY => Some(AnalogAxis::LeftY),
        Axis::LeftZ => Some(AnalogAxis::LeftTrigger),
        Axis::RightStickX => Some(AnalogAxis::RightX),
        Axis::RightStickY => Some(AnalogAxis::RightY),
        Axis::RightZ => Some(AnalogAxis::RightTrigger),
        _ => None,
    }
}

fn map_button(button: Button) -> Option<Control> {
    match button {
        Button::South => Some(Control::A),
        Button::East => Some(Control::B),
        Button::West => Some(Control::X),
        Button::North => Some(Control::Y),
        Button::LeftTrigger => Some(Control::LeftBumper),
        Button::RightTrigger => Some(Control::RightBumper),
        Button::LeftThumb => Some(Control::LeftStick),
        Button::RightThumb => Some(Control::RightStick),
        Button::Start => Some(Control::Start),
        Button::Select => Some(Control::Back),
        Button::Mode => Some(Control::Guide),
        Button::DPadUp => Some(Control::DPadUp),
        Button::DPadDown => Some(Control::DPadDown),
        Button::DPadLeft => Some(Control::DPadLeft),
        Button::DPadRight => Some(Control::DPadRight),
        _ => None,
    }
}

/// Converts a normalized backend value to the raw 16-bit range.
///
/// gilrs reports stick Y with up positive; the state uses screen coordinates.
fn scale_axis(axis: AnalogAxis, value: f32) -> i16 {
    let value = match axis {
        AnalogAxis::LeftTrigger | AnalogAxis::RightTrigger => value.clamp(0.0, 1.0),
        AnalogAxis::LeftY | AnalogAxis::RightY => -value.clamp(-1.0, 1.0),
        AnalogAxis::LeftX | AnalogAxis::RightX => value.clamp(-1.0, 1.0),
    };
    (value * AXIS_SCALE).round() as i16
}
