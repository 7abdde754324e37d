//! Platform abstraction layer
//!
//! Translates raw browser input into simulation terms:
//! - DOM key names to [`Key`]
//! - Pointer client coordinates to normalized device coordinates

use glam::Vec2;

/// Keys the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Other,
}

impl Key {
    /// Decode `KeyboardEvent.key`
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" | "a" | "A" => Key::Left,
            "ArrowRight" | "d" | "D" => Key::Right,
            _ => Key::Other,
        }
    }
}

/// Canvas placement needed to map pointer events
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    /// Client-space left edge
    pub left: f32,
    /// Client-space bottom edge
    pub bottom: f32,
    /// Drawing-buffer size in pixels
    pub width: f32,
    pub height: f32,
}

/// Map a pointer position in client pixels to world coordinates
///
/// Screen y grows downward while world y grows upward, so y is measured from
/// the canvas bottom edge.
pub fn pointer_to_world(client_x: f32, client_y: f32, canvas: &CanvasRect) -> Vec2 {
    let x = (client_x - canvas.left) / canvas.width * 2.0 - 1.0;
    let y = (canvas.bottom - client_y) / canvas.height * 2.0 - 1.0;
    Vec2::new(x, y)
}
