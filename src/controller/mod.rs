//! Controller subsystem for gamepad input handling
//!
//! Input flows through two stages:
//!
//! 1. [`input_source`] - Drains gamepad backend events as indexed [`InputEvent`]s
//! 2. [`translator`] - Applies each event to the [`ControllerState`] snapshot
//!
//! # Architecture
//!
//! ```text
//! Gamepad ──► InputSource ──► EventTranslator ──► ControllerState
//!             (indexed events)  (map or ignore)
//! ```
//!
//! Everything runs on the UI thread, once per frame.

pub mod input_source;
pub mod state;
pub mod translator;

pub use input_source::{InputError, InputSource};
pub use state::{AnalogAxis, ButtonState, Control, ControllerState};
pub use translator::{Applied, EventTranslator, InputEvent, TranslatorSettings};
