//! Input state for overlay interaction

use super::Rect;

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub left_pressed: bool,  // Just pressed this frame
    pub left_released: bool, // Just released this frame
    pub scroll: f32,         // Scroll wheel delta
}

impl MouseState {
    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }
}

/// UI context passed through the frame
#[derive(Debug, Default)]
pub struct UiContext {
    pub mouse: MouseState,
    /// A clickable widget is under the mouse
    pub hot: bool,
    /// The mouse is over some overlay element; the scene must not react
    pub captured: bool,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset at start of frame (call before UI code)
    pub fn begin_frame(&mut self, mouse: MouseState) {
        self.mouse = mouse;
        self.hot = false;
        self.captured = false;
    }

    /// Claim the area of a drawn element
    pub fn occupy(&mut self, rect: &Rect) {
        if self.mouse.inside(rect) {
            self.captured = true;
        }
    }

    /// Claim a clickable element; true if it was clicked this frame
    pub fn button(&mut self, rect: &Rect) -> bool {
        self.occupy(rect);
        if self.mouse.inside(rect) {
            self.hot = true;
        }
        self.mouse.clicked(rect)
    }
}

/// Pointer travel (pixels) below which a press-release counts as a click
pub const CLICK_SLOP: f32 = 4.0;

/// Tells a click on the scene apart from an orbit drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerGesture {
    start: (f32, f32),
    last: (f32, f32),
    dragging: bool,
}

impl PointerGesture {
    pub fn press(x: f32, y: f32) -> Self {
        Self { start: (x, y), last: (x, y), dragging: false }
    }

    /// Pointer moved while held. Returns the drag delta once past the slop.
    pub fn move_to(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        if !self.dragging {
            let (dx, dy) = (x - self.start.0, y - self.start.1);
            if dx * dx + dy * dy < CLICK_SLOP * CLICK_SLOP {
                return None;
            }
            self.dragging = true;
        }
        let delta = (x - self.last.0, y - self.last.1);
        self.last = (x, y);
        Some(delta)
    }

    /// Released: true if this was a click rather than a drag
    pub fn release(self) -> bool {
        !self.dragging
    }
}
