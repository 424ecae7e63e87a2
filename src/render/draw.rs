//! Per-frame draw description.
//!
//! [`FrameBuilder::build`] turns a [`ControllerState`] into a flat list of
//! [`DrawCommand`]s. Each command carries its own color, so drawing never depends
//! on a previously set "current" color.

use egui::{pos2, vec2, Color32, Pos2, Rect};

use crate::config::{Config, DisplayMode, Theme};
use crate::controller::state::{AnalogAxis, Control, ControllerState};
use crate::render::layout::{Layout, HANDLE_SIZE};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear { color: Color32 },
    StrokeRect { rect: Rect, color: Color32 },
    FillRect { rect: Rect, color: Color32 },
    Line { from: Pos2, to: Pos2, color: Color32 },
    Sprite { control: Control, pressed: bool, rect: Rect },
}

pub type DrawList = Vec<DrawCommand>;

/// Raw axis value to pixel conversion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayMapping {
    pub axis_divisor: i32,
    pub trigger_bar_offset: i32,
}

impl Default for DisplayMapping {
    fn default() -> Self {
        Self {
            axis_divisor: 512,
            trigger_bar_offset: 64,
        }
    }
}

impl DisplayMapping {
    /// Pixel offset for a raw axis value, truncated towards zero
    pub fn offset(&self, raw: i32) -> i32 {
        raw / self.axis_divisor
    }

    pub fn trigger_height(&self, raw: i32, max: f32) -> f32 {
        let height = (raw / self.axis_divisor).saturating_add(self.trigger_bar_offset);
        (height as f32).clamp(0.0, max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Color32,
    pub foreground: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color32::WHITE,
            foreground: Color32::BLACK,
        }
    }
}

impl From<&Theme> for Palette {
    fn from(theme: &Theme) -> Self {
        let (br, bg, bb) = theme.background;
        let (fr, fg, fb) = theme.foreground;
        Self {
            background: Color32::from_rgb(br, bg, bb),
            foreground: Color32::from_rgb(fr, fg, fb),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FrameBuilder {
    pub layout: Layout,
    pub mapping: DisplayMapping,
    pub mode: DisplayMode,
    pub palette: Palette,
}

impl FrameBuilder {
    pub fn from_config(config: &Config) -> Self {
        Self {
            layout: Layout::default(),
            mapping: DisplayMapping {
                axis_divisor: config.display.axis_divisor,
                trigger_bar_offset: config.display.trigger_bar_offset,
            },
            mode: config.display.mode,
            palette: Palette::from(&config.theme),
        }
    }

    pub fn build(&self, state: &ControllerState) -> DrawList {
        let mut list = vec![DrawCommand::Clear {
            color: self.palette.background,
        }];

        self.stick(
            &mut list,
            self.layout.left_stick,
            (state.axis(AnalogAxis::LeftX), state.axis(AnalogAxis::LeftY)),
            state.is_pressed(Control::LeftStick),
        );
        self.stick(
            &mut list,
            self.layout.right_stick,
            (state.axis(AnalogAxis::RightX), state.axis(AnalogAxis::RightY)),
            state.is_pressed(Control::RightStick),
        );

        self.trigger(&mut list, self.layout.left_trigger, state.axis(AnalogAxis::LeftTrigger));
        self.trigger(&mut list, self.layout.right_trigger, state.axis(AnalogAxis::RightTrigger));

        for (control, rect) in &self.layout.buttons {
            let pressed = state.is_pressed(*control);
            let command = match self.mode {
                DisplayMode::Sprites => DrawCommand::Sprite {
                    control: *control,
                    pressed,
                    rect: *rect,
                },
                DisplayMode::Outline if pressed => DrawCommand::FillRect {
                    rect: *rect,
                    color: self.palette.foreground,
                },
                DisplayMode::Outline => DrawCommand::StrokeRect {
                    rect: *rect,
                    color: self.palette.foreground,
                },
            };
            list.push(command);
        }

        list
    }

    fn stick(&self, list: &mut DrawList, square: Rect, (x, y): (i32, i32), clicked: bool) {
        // Click inverts the square: filled body, background handle
        let handle = if clicked {
            list.push(DrawCommand::FillRect {
                rect: square,
                color: self.palette.foreground,
            });
            self.palette.background
        } else {
            self.palette.foreground
        };

        list.push(DrawCommand::StrokeRect {
            rect: square,
            color: self.palette.foreground,
        });

        let offset = vec2(self.mapping.offset(x) as f32, self.mapping.offset(y) as f32);
        let center = square.center() + offset;
        list.push(DrawCommand::FillRect {
            rect: Rect::from_center_size(center, vec2(HANDLE_SIZE, HANDLE_SIZE)),
            color: handle,
        });
        list.push(DrawCommand::Line {
            from: pos2(center.x - HANDLE_SIZE, center.y),
            to: pos2(center.x + HANDLE_SIZE, center.y),
            color: handle,
        });
        list.push(DrawCommand::Line {
            from: pos2(center.x, center.y - HANDLE_SIZE),
            to: pos2(center.x, center.y + HANDLE_SIZE),
            color: handle,
        });
    }

    fn trigger(&self, list: &mut DrawList, outline: Rect, value: i32) {
        list.push(DrawCommand::StrokeRect {
            rect: outline,
            color: self.palette.foreground,
        });

        let height = self.mapping.trigger_height(value, outline.height());
        list.push(DrawCommand::FillRect {
            rect: Rect::from_min_max(pos2(outline.min.x, outline.max.y - height), outline.max),
            color: self.palette.foreground,
        });
    }
}
