//! Letterboxed mapping between the physical canvas and the logical field
//!
//! The field is always 800x600. The canvas may be any size; the field is
//! scaled uniformly to fit and centered, leaving bars on the long axis.

use glam::Vec2;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Physical surface size and the derived letterbox transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Surface size in physical pixels
    pub width: f32,
    pub height: f32,
    /// Physical pixels per field unit
    pub scale: f32,
    /// Top-left of the field on the surface
    pub offset: Vec2,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        let scale = (width / FIELD_WIDTH).min(height / FIELD_HEIGHT).max(f32::EPSILON);
        let offset = Vec2::new(
            (width - FIELD_WIDTH * scale) / 2.0,
            (height - FIELD_HEIGHT * scale) / 2.0,
        );
        Self {
            width,
            height,
            scale,
            offset,
        }
    }

    /// Surface pixel to field coordinates (may fall outside the field)
    pub fn to_field(&self, px: f32, py: f32) -> Vec2 {
        (Vec2::new(px, py) - self.offset) / self.scale
    }

    /// Field rectangle on the surface as (x, y, w, h), for the GPU viewport
    pub fn field_rect(&self) -> (f32, f32, f32, f32) {
        (
            self.offset.x,
            self.offset.y,
            FIELD_WIDTH * self.scale,
            FIELD_HEIGHT * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fit() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.scale, 1.0);
        assert_eq!(vp.offset, Vec2::ZERO);
        assert_eq!(vp.to_field(400.0, 300.0), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_wide_surface_pillarboxes() {
        let vp = Viewport::new(1920.0, 1080.0);
        assert!((vp.scale - 1.8).abs() < 0.0001);
        assert!((vp.offset.x - 240.0).abs() < 0.001);
        assert_eq!(vp.offset.y, 0.0);
        let p = vp.to_field(240.0, 0.0);
        assert!(p.length() < 0.001);
    }

    #[test]
    fn test_tall_surface_letterboxes() {
        let vp = Viewport::new(400.0, 900.0);
        assert_eq!(vp.scale, 0.5);
        assert_eq!(vp.offset.x, 0.0);
        assert_eq!(vp.offset.y, 300.0);
        let p = vp.to_field(200.0, 450.0);
        assert_eq!(p, Vec2::new(400.0, 300.0));
        let (_, y, w, h) = vp.field_rect();
        assert_eq!((y, w, h), (300.0, 400.0, 300.0));
    }
}
