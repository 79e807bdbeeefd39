//! Playfield geometry: axis-aligned boxes, bounds checks, aiming
//!
//! Screen coordinates: origin top-left, +x right, +y down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// An axis-aligned box described by its center and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Square box enclosing a circle of the given radius
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::new(center, Vec2::splat(2.0 * radius))
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Strict overlap test; boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Per-axis containment in the playfield: `(horizontal_ok, vertical_ok)`
///
/// An axis is ok iff the box lies fully within `[0, width]` (or `[0, height]`).
pub fn in_bounds(rect: &Rect) -> (bool, bool) {
    let horizontal = rect.left() >= 0.0 && rect.right() <= SCREEN_WIDTH;
    let vertical = rect.top() >= 0.0 && rect.bottom() <= SCREEN_HEIGHT;
    (horizontal, vertical)
}

/// True iff the box is within the playfield on both axes
#[inline]
pub fn fully_in_bounds(rect: &Rect) -> bool {
    in_bounds(rect) == (true, true)
}

/// Unit vector pointing from `from` toward `to`
///
/// Coincident points have no direction; the zero vector is returned.
pub fn unit_direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds_inside() {
        let r = Rect::new(Vec2::new(550.0, 325.0), Vec2::new(100.0, 100.0));
        assert_eq!(in_bounds(&r), (true, true));
    }

    #[test]
    fn test_in_bounds_touching_edges_is_inside() {
        let r = Rect::new(Vec2::new(50.0, 600.0), Vec2::new(100.0, 100.0));
        assert_eq!(in_bounds(&r), (true, true));
    }

    #[test]
    fn test_in_bounds_per_axis() {
        let past_left = Rect::new(Vec2::new(10.0, 300.0), Vec2::new(40.0, 40.0));
        assert_eq!(in_bounds(&past_left), (false, true));

        let past_bottom = Rect::new(Vec2::new(300.0, 640.0), Vec2::new(40.0, 40.0));
        assert_eq!(in_bounds(&past_bottom), (true, false));

        let corner = Rect::new(Vec2::new(1095.0, 5.0), Vec2::new(40.0, 40.0));
        assert_eq!(in_bounds(&corner), (false, false));
        assert!(!fully_in_bounds(&corner));
    }

    #[test]
    fn test_overlaps() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(8.0, 8.0), Vec2::new(10.0, 10.0));
        let c = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Shared edge only
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_unit_direction() {
        let d = unit_direction(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert!((d.x - 0.6).abs() < 1e-6);
        assert!((d.y - 0.8).abs() < 1e-6);
        assert!((d.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_unit_direction_coincident_is_zero() {
        let p = Vec2::new(120.0, 80.0);
        assert_eq!(unit_direction(p, p), Vec2::ZERO);
    }
}
