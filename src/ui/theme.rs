//! Overlay theme - shared colors and styling constants

use macroquad::prelude::Color;

// =============================================================================
// Base Colors
// =============================================================================

/// Panel background (translucent over the scene)
pub const PANEL_BG: Color = Color::new(0.02, 0.02, 0.06, 0.78);

/// Panel border
pub const PANEL_BORDER: Color = Color::new(0.0, 1.0, 1.0, 0.35);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.92, 0.92, 0.95, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.6, 0.6, 0.68, 1.0);

/// Accent (cyan, matches the WEB planet)
pub const ACCENT: Color = Color::new(0.0, 1.0, 1.0, 1.0);

/// Hovered button background
pub const BUTTON_HOVER: Color = Color::new(0.0, 1.0, 1.0, 0.15);

/// Nav bar background
pub const NAV_BG: Color = Color::new(0.0, 0.0, 0.0, 0.55);

// =============================================================================
// Font Sizes
// =============================================================================

/// Splash title
pub const FONT_SIZE_TITLE: f32 = 64.0;

/// Panel header text size
pub const FONT_SIZE_HEADER: f32 = 28.0;

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 18.0;

/// Nav items, buttons
pub const FONT_SIZE_SMALL: f32 = 16.0;

// =============================================================================
// Layout
// =============================================================================

pub const NAV_HEIGHT: f32 = 48.0;
pub const PANEL_WIDTH: f32 = 420.0;
pub const PANEL_PADDING: f32 = 20.0;
pub const LINE_HEIGHT: f32 = 24.0;
pub const CLOSE_SIZE: f32 = 24.0;

/// `color` with its alpha scaled by `alpha`
pub fn faded(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, color.a * alpha.clamp(0.0, 1.0))
}
