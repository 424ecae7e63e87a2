use egui::{pos2, vec2, Rect};

use crate::controller::state::Control;

/// Fixed inner size of the window the layout is drawn into
pub const WINDOW_WIDTH: f32 = 640.0;
pub const WINDOW_HEIGHT: f32 = 480.0;

/// Edge length of a stick's square outline
pub const STICK_SIZE: f32 = 133.0;
/// Edge length of the crosshair handle inside a stick square
pub const HANDLE_SIZE: f32 = 6.0;

const TRIGGER_WIDTH: f32 = 24.0;
const TRIGGER_HEIGHT: f32 = 128.0;
const BUTTON_SIZE: f32 = 40.0;

/// Screen position of every drawn element, in window coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub left_stick: Rect,
    pub right_stick: Rect,
    pub left_trigger: Rect,
    pub right_trigger: Rect,
    /// Digital controls with their own on-screen element. Stick clicks are
    /// shown on the stick squares and are not listed here.
    pub buttons: Vec<(Control, Rect)>,
}

impl Layout {
    pub fn button_rect(&self, control: Control) -> Option<Rect> {
        self.buttons
            .iter()
            .find(|(c, _)| *c == control)
            .map(|(_, rect)| *rect)
    }
}

fn square(x: f32, y: f32, size: f32) -> Rect {
    Rect::from_min_size(pos2(x, y), vec2(size, size))
}

impl Default for Layout {
    /// Xbox-style arrangement for the fixed window size
    fn default() -> Self {
        let wide = |x: f32, y: f32| Rect::from_min_size(pos2(x, y), vec2(40.0, 24.0));
        Self {
            left_stick: square(60.0, 70.0, STICK_SIZE),
            right_stick: square(360.0, 260.0, STICK_SIZE),
            left_trigger: Rect::from_min_size(pos2(16.0, 20.0), vec2(TRIGGER_WIDTH, TRIGGER_HEIGHT)),
            right_trigger: Rect::from_min_size(pos2(600.0, 20.0), vec2(TRIGGER_WIDTH, TRIGGER_HEIGHT)),
            buttons: vec![
                (Control::LeftBumper, Rect::from_min_size(pos2(60.0, 20.0), vec2(133.0, 28.0))),
                (Control::RightBumper, Rect::from_min_size(pos2(447.0, 20.0), vec2(133.0, 28.0))),
                (Control::Back, wide(250.0, 128.0)),
                (Control::Guide, square(300.0, 120.0, BUTTON_SIZE)),
                (Control::Start, wide(350.0, 128.0)),
                (Control::Y, square(493.0, 70.0, BUTTON_SIZE)),
                (Control::X, square(448.0, 115.0, BUTTON_SIZE)),
                (Control::B, square(538.0, 115.0, BUTTON_SIZE)),
                (Control::A, square(493.0, 160.0, BUTTON_SIZE)),
                (Control::DPadUp, square(180.0, 270.0, BUTTON_SIZE)),
                (Control::DPadLeft, square(135.0, 315.0, BUTTON_SIZE)),
                (Control::DPadRight, square(225.0, 315.0, BUTTON_SIZE)),
                (Control::DPadDown, square(180.0, 360.0, BUTTON_SIZE)),
            ],
        }
    }
}
