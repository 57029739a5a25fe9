//! Input adapters
//!
//! Keyboard events become a small pressed/released table that the
//! simulation polls once per frame. Pointer and touch positions arrive in
//! client pixels and are rescaled into world units here, so the simulation
//! never sees display coordinates.

use glam::Vec2;

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

/// Keys a game can track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    const COUNT: usize = 4;

    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Keys used by the dodge game
pub const FOUR_WAY: &[Key] = &[Key::Up, Key::Down, Key::Left, Key::Right];
/// Keys used by the shooter
pub const TWO_WAY: &[Key] = &[Key::Left, Key::Right];

/// Pressed/released state for a fixed set of tracked keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyState {
    tracked: &'static [Key],
    pressed: [bool; Key::COUNT],
}

impl KeyState {
    pub fn new(tracked: &'static [Key]) -> Self {
        Self {
            tracked,
            pressed: [false; Key::COUNT],
        }
    }

    pub fn tracks(&self, key: Key) -> bool {
        self.tracked.contains(&key)
    }

    /// Record a keydown. Returns false for untracked keys (left to the browser).
    pub fn press(&mut self, dom_key: &str) -> bool {
        self.set(dom_key, true)
    }

    /// Record a keyup. Returns false for untracked keys.
    pub fn release(&mut self, dom_key: &str) -> bool {
        self.set(dom_key, false)
    }

    fn set(&mut self, dom_key: &str, down: bool) -> bool {
        match Key::from_dom(dom_key) {
            Some(key) if self.tracks(key) => {
                self.pressed[key.index()] = down;
                true
            }
            _ => false,
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    pub fn clear(&mut self) {
        self.pressed = [false; Key::COUNT];
    }

    /// Snapshot for one simulation frame
    pub fn snapshot(&self, touch: Option<Vec2>) -> TickInput {
        TickInput {
            up: self.is_down(Key::Up),
            down: self.is_down(Key::Down),
            left: self.is_down(Key::Left),
            right: self.is_down(Key::Right),
            touch,
        }
    }
}

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Latest touch point in world units, if the player touched this frame
    pub touch: Option<Vec2>,
}

/// Maps client (CSS pixel) coordinates onto the fixed world resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    /// Displayed canvas origin in client coordinates
    pub left: f32,
    pub top: f32,
    /// Displayed (CSS) canvas size
    pub displayed_width: f32,
    pub displayed_height: f32,
}

impl ViewportTransform {
    pub fn new(left: f32, top: f32, displayed_width: f32, displayed_height: f32) -> Self {
        Self {
            left,
            top,
            displayed_width,
            displayed_height,
        }
    }

    /// Canvas shown at exactly its world size at the page origin
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT)
    }

    /// World units per displayed pixel on each axis
    pub fn scale(&self) -> Vec2 {
        // A collapsed canvas (display: none, zero size) has no meaningful ratio
        let sx = if self.displayed_width > 0.0 {
            WORLD_WIDTH / self.displayed_width
        } else {
            1.0
        };
        let sy = if self.displayed_height > 0.0 {
            WORLD_HEIGHT / self.displayed_height
        } else {
            1.0
        };
        Vec2::new(sx, sy)
    }

    pub fn to_world(&self, client_x: f32, client_y: f32) -> Vec2 {
        (Vec2::new(client_x, client_y) - Vec2::new(self.left, self.top)) * self.scale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untracked_keys_ignored() {
        let mut keys = KeyState::new(TWO_WAY);
        assert!(!keys.press("ArrowUp"));
        assert!(!keys.press("a"));
        assert!(!keys.is_down(Key::Up));

        assert!(keys.press("ArrowLeft"));
        assert!(keys.is_down(Key::Left));
        assert!(keys.release("ArrowLeft"));
        assert!(!keys.is_down(Key::Left));
    }

    #[test]
    fn test_snapshot_reflects_held_keys() {
        let mut keys = KeyState::new(FOUR_WAY);
        keys.press("ArrowUp");
        keys.press("ArrowRight");
        let input = keys.snapshot(None);
        assert!(input.up && input.right);
        assert!(!input.down && !input.left);

        keys.clear();
        assert_eq!(keys.snapshot(None), TickInput::default());
    }

    #[test]
    fn test_half_size_display_doubles_coordinates() {
        let vp = ViewportTransform::new(10.0, 20.0, 400.0, 300.0);
        let p = vp.to_world(210.0, 170.0);
        assert_eq!(p, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_identity_transform() {
        let vp = ViewportTransform::identity();
        assert_eq!(vp.to_world(123.0, 456.0), Vec2::new(123.0, 456.0));
    }

    #[test]
    fn test_zero_size_display_does_not_divide_by_zero() {
        let vp = ViewportTransform::new(0.0, 0.0, 0.0, 0.0);
        let p = vp.to_world(5.0, 6.0);
        assert!(p.is_finite());
        assert_eq!(p, Vec2::new(5.0, 6.0));
    }
}
