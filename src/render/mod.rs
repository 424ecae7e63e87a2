//! Controller drawing
//!
//! [`draw`] builds a declarative [`DrawList`] from the controller state using the
//! element positions in [`layout`]; [`painter`] replays that list onto an egui
//! painter each frame.

pub mod draw;
pub mod layout;
pub mod painter;

pub use draw::{DisplayMapping, DrawCommand, DrawList, FrameBuilder, Palette};
pub use layout::Layout;
