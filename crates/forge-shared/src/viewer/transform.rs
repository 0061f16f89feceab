use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Smallest zoom factor.
pub const MIN_SCALE: f64 = 0.5;
/// Largest zoom factor.
pub const MAX_SCALE: f64 = 5.0;
/// Multiplicative zoom per wheel tick or button press.
pub const ZOOM_STEP: f64 = 1.3;
/// Pixels moved per arrow key press.
pub const PAN_STEP: f64 = 50.0;

/// A position in container-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Translation and uniform scale of the image layer, origin at the container's top-left.
///
/// A content point `c` is drawn at `offset + scale * c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewerTransform {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Default for ViewerTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewerTransform {
    pub const IDENTITY: ViewerTransform = ViewerTransform {
        offset_x: 0.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    /// Exactly the identity, with no tolerance.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.offset_x = offset.x;
        self.offset_y = offset.y;
    }

    /// Multiply the scale by `delta`, keeping the content under `focal` in place.
    ///
    /// The resulting scale is clamped to `[MIN_SCALE, MAX_SCALE]`; the offset
    /// uses the ratio actually applied, so the focal point holds at the limits too.
    pub fn zoom_at(&mut self, delta: f64, focal: Point) {
        if !delta.is_finite() || delta <= 0.0 {
            return;
        }
        let new_scale = (self.scale * delta).clamp(MIN_SCALE, MAX_SCALE);
        let ratio = new_scale / self.scale;

        self.offset_x = focal.x - ratio * (focal.x - self.offset_x);
        self.offset_y = focal.y - ratio * (focal.y - self.offset_y);
        self.scale = new_scale;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Where content point `p` lands in the container.
    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(
            self.offset_x + self.scale * p.x,
            self.offset_y + self.scale * p.y,
        )
    }

    /// Content point drawn at container point `p`.
    pub fn to_content(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset_x) / self.scale,
            (p.y - self.offset_y) / self.scale,
        )
    }

    /// CSS `transform` value for the image layer.
    pub fn css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.offset_x, self.offset_y, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    #[test]
    fn test_zoom_from_identity_toward_point() {
        let mut t = ViewerTransform::IDENTITY;
        t.zoom_at(2.0, Point::new(100.0, 100.0));
        assert_close(t.scale, 2.0);
        assert_close(t.offset_x, -100.0);
        assert_close(t.offset_y, -100.0);
    }

    #[test]
    fn test_focal_point_stays_put() {
        let mut t = ViewerTransform {
            offset_x: 37.0,
            offset_y: -12.5,
            scale: 1.7,
        };
        let focal = Point::new(240.0, 135.0);
        let under_focal = t.to_content(focal);

        t.zoom_at(ZOOM_STEP, focal);
        let after = t.to_screen(under_focal);
        assert_close(after.x, focal.x);
        assert_close(after.y, focal.y);

        t.zoom_at(1.0 / ZOOM_STEP / ZOOM_STEP, focal);
        let after = t.to_screen(under_focal);
        assert_close(after.x, focal.x);
        assert_close(after.y, focal.y);
    }

    #[test]
    fn test_scale_is_clamped() {
        let mut t = ViewerTransform::IDENTITY;
        for _ in 0..50 {
            t.zoom_at(ZOOM_STEP, Point::new(10.0, 10.0));
            assert!(t.scale <= MAX_SCALE);
        }
        assert_close(t.scale, MAX_SCALE);

        for _ in 0..50 {
            t.zoom_at(1.0 / ZOOM_STEP, Point::new(10.0, 10.0));
            assert!(t.scale >= MIN_SCALE);
        }
        assert_close(t.scale, MIN_SCALE);
    }

    #[test]
    fn test_focal_point_holds_when_clamped() {
        let mut t = ViewerTransform {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 4.5,
        };
        let focal = Point::new(50.0, 80.0);
        let under_focal = t.to_content(focal);
        t.zoom_at(10.0, focal);
        assert_close(t.scale, MAX_SCALE);
        let after = t.to_screen(under_focal);
        assert_close(after.x, focal.x);
        assert_close(after.y, focal.y);
    }

    #[test]
    fn test_degenerate_zoom_factor_is_ignored() {
        let mut t = ViewerTransform::IDENTITY;
        t.zoom_at(0.0, Point::new(1.0, 1.0));
        t.zoom_at(-2.0, Point::new(1.0, 1.0));
        t.zoom_at(f64::NAN, Point::new(1.0, 1.0));
        assert!(t.is_identity());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut t = ViewerTransform {
            offset_x: -310.0,
            offset_y: 42.0,
            scale: 3.2,
        };
        t.reset();
        assert_eq!(t, ViewerTransform::IDENTITY);
        t.reset();
        assert_eq!(t, ViewerTransform::IDENTITY);
    }

    #[test]
    fn test_css_output() {
        let t = ViewerTransform {
            offset_x: -100.0,
            offset_y: 20.5,
            scale: 2.0,
        };
        assert_eq!(t.css(), "translate(-100px, 20.5px) scale(2)");
    }
}
