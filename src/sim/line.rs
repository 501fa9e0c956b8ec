//! Line segments and collision surfaces
//!
//! A `Line` caches its slope-intercept form so that the intersection test in
//! the per-drop hot loop is a handful of multiplies. Vertical segments (within
//! tolerance) carry an infinite slope and no intercept.

use glam::Vec2;

use super::tolerance::{approx_eq, in_range_inclusive};

/// A finite line segment with derived slope and y-intercept
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    start: Vec2,
    end: Vec2,
    /// `f32::INFINITY` when vertical
    slope: f32,
    /// Absent exactly when vertical
    y_intercept: Option<f32>,
}

impl Default for Line {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::X)
    }
}

impl Line {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        let mut line = Self {
            start,
            end,
            slope: 0.0,
            y_intercept: None,
        };
        line.update_from(start, end);
        line
    }

    /// Re-derive the whole line from two new endpoints
    pub fn update_from(&mut self, start: Vec2, end: Vec2) {
        self.start = start;
        self.end = end;
        if approx_eq(start.x, end.x) {
            self.slope = f32::INFINITY;
            self.y_intercept = None;
        } else {
            let slope = (end.y - start.y) / (end.x - start.x);
            self.slope = slope;
            self.y_intercept = Some(start.y - slope * start.x);
        }
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.end
    }

    #[inline]
    pub fn slope(&self) -> f32 {
        self.slope
    }

    #[inline]
    pub fn y_intercept(&self) -> Option<f32> {
        self.y_intercept
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.y_intercept.is_none()
    }

    /// Segment direction (end - start)
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    /// Whether `x` lies within this segment's horizontal extent (exact comparison)
    fn spans_x(&self, x: f32) -> bool {
        x >= self.start.x.min(self.end.x) && x <= self.start.x.max(self.end.x)
    }

    /// Whether `y` lies within this segment's vertical extent (exact comparison)
    fn spans_y(&self, y: f32) -> bool {
        y >= self.start.y.min(self.end.y) && y <= self.start.y.max(self.end.y)
    }

    /// Segment intersection test.
    ///
    /// Solves the two line equations and checks the crossing against the
    /// segments' bounding extents. Parallel and coincident segments never
    /// collide, even when they overlap. Shared-endpoint configurations can
    /// go either way; that is accepted for pixel-scale visuals.
    ///
    /// When both lines are sloped, and when only `other` is vertical, the
    /// extent checks are exact. When only `self` is vertical they go through
    /// [`in_range_inclusive`].
    pub fn collides_with(&self, other: &Line) -> bool {
        if approx_eq(self.slope, other.slope) {
            return false;
        }

        match (self.y_intercept, other.y_intercept) {
            // Both vertical: parallel. (inf - inf is NaN, so approx_eq misses it.)
            (None, None) => false,
            (Some(b1), Some(b2)) => {
                let x = (b2 - b1) / (self.slope - other.slope);
                self.spans_x(x) && other.spans_x(x)
            }
            (Some(b), None) => {
                let x = other.start.x;
                let y = self.slope * x + b;
                other.spans_y(y) && self.spans_x(x)
            }
            (None, Some(b)) => {
                let x = self.start.x;
                if !in_range_inclusive(x, other.start.x, other.end.x) {
                    return false;
                }
                let other_y = other.slope * x + b;
                in_range_inclusive(other_y, self.start.y, self.end.y)
            }
        }
    }
}

/// A line segment with a precomputed unit normal, used as a bounce surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalLine {
    line: Line,
    normal: Vec2,
}

impl NormalLine {
    /// Build a surface from two endpoints.
    ///
    /// Zero-length segments produce a NaN normal; check [`NormalLine::is_degenerate`]
    /// before bouncing anything off one.
    pub fn new(start: Vec2, end: Vec2) -> Self {
        let line = Line::new(start, end);
        Self {
            line,
            normal: Self::compute_normal(&line),
        }
    }

    pub fn update_from(&mut self, start: Vec2, end: Vec2) {
        self.line.update_from(start, end);
        self.normal = Self::compute_normal(&self.line);
    }

    fn compute_normal(line: &Line) -> Vec2 {
        let dir = line.direction();
        let perp = Vec2::new(-dir.y, dir.x);
        perp / perp.length()
    }

    #[inline]
    pub fn line(&self) -> &Line {
        &self.line
    }

    #[inline]
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.line.start == self.line.end
    }

    #[inline]
    pub fn collides_with(&self, other: &Line) -> bool {
        self.line.collides_with(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x1: f32, y1: f32, x2: f32, y2: f32) -> Line {
        Line::new(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }

    #[test]
    fn test_slope_and_intercept() {
        let line = seg(0.0, 1.0, 2.0, 5.0);
        assert!((line.slope() - 2.0).abs() < 0.0001);
        assert_eq!(line.y_intercept(), Some(1.0));
        assert!(!line.is_vertical());
    }

    #[test]
    fn test_near_vertical_is_vertical() {
        let line = seg(5.0, 0.0, 5.005, 10.0);
        assert!(line.is_vertical());
        assert_eq!(line.slope(), f32::INFINITY);
        assert_eq!(line.y_intercept(), None);
    }

    #[test]
    fn test_update_from_rederives_everything() {
        let mut line = seg(0.0, 0.0, 10.0, 10.0);
        line.update_from(Vec2::new(3.0, 0.0), Vec2::new(3.0, 8.0));
        assert!(line.is_vertical());
        line.update_from(Vec2::new(0.0, 4.0), Vec2::new(8.0, 4.0));
        assert_eq!(line.slope(), 0.0);
        assert_eq!(line.y_intercept(), Some(4.0));
    }

    #[test]
    fn test_crossing_diagonals_collide() {
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let b = seg(0.0, 10.0, 10.0, 0.0);
        assert!(a.collides_with(&b));
        assert!(b.collides_with(&a));
    }

    #[test]
    fn test_parallel_disjoint_do_not_collide() {
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let c = seg(20.0, 20.0, 30.0, 30.0);
        assert!(!a.collides_with(&c));
    }

    #[test]
    fn test_collinear_overlap_is_not_a_collision() {
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let b = seg(5.0, 5.0, 15.0, 15.0);
        assert!(!a.collides_with(&b));
    }

    #[test]
    fn test_crossing_outside_extents_misses() {
        // Lines cross at (5, 5) but the second segment stops at x = 4
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let b = seg(0.0, 10.0, 4.0, 6.0);
        assert!(!a.collides_with(&b));
    }

    #[test]
    fn test_vertical_against_horizontal() {
        let vertical = seg(5.0, 0.0, 5.0, 10.0);
        let horizontal = seg(0.0, 5.0, 10.0, 5.0);
        assert!(vertical.collides_with(&horizontal));
        assert!(horizontal.collides_with(&vertical));
    }

    #[test]
    fn test_vertical_miss() {
        let vertical = seg(5.0, 0.0, 5.0, 4.0);
        let horizontal = seg(0.0, 5.0, 10.0, 5.0);
        assert!(!vertical.collides_with(&horizontal));
        assert!(!horizontal.collides_with(&vertical));

        let off_to_side = seg(20.0, 0.0, 20.0, 10.0);
        assert!(!off_to_side.collides_with(&horizontal));
        assert!(!horizontal.collides_with(&off_to_side));
    }

    #[test]
    fn test_two_verticals_never_collide() {
        let a = seg(5.0, 0.0, 5.0, 10.0);
        let b = seg(5.0, 5.0, 5.0, 20.0);
        assert!(!a.collides_with(&b));
    }

    #[test]
    fn test_vertical_tolerance_only_when_self_is_vertical() {
        // Horizontal segment ends just short of the vertical line's x
        let vertical = seg(10.0, 0.0, 10.0, 10.0);
        let short = seg(0.0, 5.0, 9.95, 5.0);
        assert!(vertical.collides_with(&short));
        assert!(!short.collides_with(&vertical));
    }

    #[test]
    fn test_floor_normal() {
        let floor = NormalLine::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(floor.normal().x.abs() < 0.0001);
        assert!((floor.normal().y - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_normal_is_unit_length() {
        let slanted = NormalLine::new(Vec2::new(3.0, 7.0), Vec2::new(40.0, 22.0));
        assert!((slanted.normal().length() - 1.0).abs() < 0.0001);
        assert!(slanted.normal().dot(slanted.line().direction()).abs() < 0.001);
    }

    #[test]
    fn test_degenerate_normal_is_nan() {
        let dot = NormalLine::new(Vec2::new(4.0, 4.0), Vec2::new(4.0, 4.0));
        assert!(dot.is_degenerate());
        assert!(dot.normal().x.is_nan());
    }

    #[test]
    fn test_normal_line_update_recomputes_normal() {
        let mut surface = NormalLine::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        surface.update_from(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0));
        assert!(surface.line().is_vertical());
        assert!((surface.normal().x + 1.0).abs() < 0.0001);
    }
}
