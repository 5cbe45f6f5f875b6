//! Immediate-mode overlay drawn over the scene
//!
//! - Simple rectangle-based layout
//! - No retained widget state, rebuilt each frame from `Experience`
//! - Macroquad integration for rendering

mod rect;
mod input;
mod text;
mod theme;
mod overlay;

pub use rect::*;
pub use input::*;
pub use text::*;
pub use theme::faded;
pub use overlay::{draw_overlay, UiAction};
