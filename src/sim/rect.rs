//! Axis-aligned rectangle geometry for hitboxes and UI controls
//!
//! Field coordinates: origin at the top-left corner, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Shrink by `pad` on every side; collapses to the center rather than inverting
    pub fn inset(&self, pad: f32) -> Self {
        let pad_x = pad.min(self.w / 2.0);
        let pad_y = pad.min(self.h / 2.0);
        Self::new(
            self.x + pad_x,
            self.y + pad_y,
            self.w - 2.0 * pad_x,
            self.h - 2.0 * pad_y,
        )
    }

    /// Scale width and height around the center
    pub fn scaled(&self, factor: f32) -> Self {
        let c = self.center();
        let w = self.w * factor;
        let h = self.h * factor;
        Self::new(c.x - w / 2.0, c.y - h / 2.0, w, h)
    }

    /// Strict overlap test (shared edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Horizontal-only overlap (used by the spawner, which places on one row)
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }

    /// Point containment, edges inclusive
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}
