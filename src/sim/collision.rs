//! Axis-aligned rectangles and overlap testing
//!
//! Every entity in both games is a rectangle in world units, so the whole
//! collision model is a single AABB test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

/// Rectangle with its top-left corner at (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size whose center is at (cx, cy)
    pub fn centered_at(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// AABB overlap. Touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Keep the whole rectangle inside the world
    pub fn clamp_to_world(&mut self) {
        self.x = self.x.clamp(0.0, (WORLD_WIDTH - self.width).max(0.0));
        self.y = self.y.clamp(0.0, (WORLD_HEIGHT - self.height).max(0.0));
    }

    /// Keep the rectangle inside the world horizontally only
    pub fn clamp_x_to_world(&mut self) {
        self.x = self.x.clamp(0.0, (WORLD_WIDTH - self.width).max(0.0));
    }

    /// True once the top edge has passed the bottom of the world
    pub fn is_below_world(&self) -> bool {
        self.y >= WORLD_HEIGHT
    }

    /// True once the bottom edge has passed the top of the world
    pub fn is_above_world(&self) -> bool {
        self.bottom() < 0.0
    }
}
