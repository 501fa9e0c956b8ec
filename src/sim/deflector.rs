//! Deflectors: static obstacles that bounce drops
//!
//! A deflector tests a drop's one-tick travel path against its surface. On a
//! hit the drop is flagged as collided and its velocity is reflected about
//! the surface normal.

use glam::Vec2;

use super::drop::Drop;
use super::line::{Line, NormalLine};
use crate::consts::RESTITUTION;
use crate::error::SimError;

/// Reflect `velocity` about a unit `normal`.
///
/// `v' = v - restitution * (v·n) * n`. A restitution of 2.0 is a mirror
/// reflection; the default 1.4 gives a soft, slightly sticky bounce.
#[inline]
pub fn calculate_bounce(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let projection = velocity.dot(normal);
    velocity - restitution * projection * normal
}

/// A straight-segment obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineDeflector {
    surface: NormalLine,
    restitution: f32,
}

impl LineDeflector {
    /// Build from two endpoints. Zero-length segments are rejected since
    /// their normal is undefined.
    pub fn new(start: Vec2, end: Vec2) -> Result<Self, SimError> {
        let surface = NormalLine::new(start, end);
        if surface.is_degenerate() {
            return Err(SimError::DegenerateSegment { start, end });
        }
        Ok(Self {
            surface,
            restitution: RESTITUTION,
        })
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    #[inline]
    pub fn surface(&self) -> &NormalLine {
        &self.surface
    }

    #[inline]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    pub fn maybe_deflect(&self, drop: &mut Drop, scratch: &mut Line) -> bool {
        drop.to_line(scratch);
        if !self.surface.collides_with(scratch) {
            return false;
        }
        drop.collided = true;
        drop.velocity = calculate_bounce(drop.velocity, self.surface.normal(), self.restitution);
        true
    }
}

/// Obstacle kinds a scene can contain
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deflector {
    Line(LineDeflector),
}

impl Deflector {
    /// Straight-segment deflector with the default restitution
    pub fn line(start: Vec2, end: Vec2) -> Result<Self, SimError> {
        LineDeflector::new(start, end).map(Deflector::Line)
    }

    pub fn with_restitution(self, restitution: f32) -> Self {
        match self {
            Deflector::Line(d) => Deflector::Line(d.with_restitution(restitution)),
        }
    }

    /// Test the drop's next step against this obstacle and bounce it on contact.
    ///
    /// `scratch` is overwritten with the drop's path so callers can reuse one
    /// line across a whole tick. Returns whether the drop was deflected; on a
    /// miss the drop is left untouched.
    pub fn maybe_deflect(&self, drop: &mut Drop, scratch: &mut Line) -> bool {
        match self {
            Deflector::Line(d) => d.maybe_deflect(drop, scratch),
        }
    }

    /// Segment endpoints for the renderer
    pub fn endpoints(&self) -> (Vec2, Vec2) {
        match self {
            Deflector::Line(d) => (d.surface.line().start(), d.surface.line().end()),
        }
    }
}
