//! Drop emitters
//!
//! An emitter claims free slots in a [`DropPool`] and gives each one a spawn
//! location and velocity. Every call claims at most `limit` drops, scanning the
//! pool in index order and stopping as soon as the budget is spent.
//!
//! | Kind | Default limit | Spawn point | Velocity |
//! |------|---------------|-------------|----------|
//! | [`EmitterKind::Rain`] | 5 | random x in `[left, right]`, y in `[0, 4]` | `(0.25, [0, 2])` |
//! | [`EmitterKind::Sprinkler`] | 3 | fixed | `([-1, 1], [-1, 0.1])` |
//! | [`EmitterKind::Shower`] | 3 | fixed | `([-0.25, 0.25], [0.1, 1])` |
//! | [`EmitterKind::MultiShower`] | 3 | one of several heads | `([-0.1, 0.1], [0.1, 1])` |

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::drop::{Drop, DropPool};
use crate::consts::*;

/// Spawn policy for an emitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EmitterKind {
    /// Drops start along the top of the screen and fall with a slight drift
    Rain { left: i32, right: i32 },
    /// Drops spray upward and sideways from a movable point
    Sprinkler { location: Vec2 },
    /// Drops fall from a movable point with a narrow spread
    Shower { location: Vec2 },
    /// Drops fall from one of `count + 1` evenly spaced heads at `height`,
    /// the first at `left` and the last at `right`
    MultiShower {
        height: f32,
        left: f32,
        right: f32,
        count: u32,
    },
}

/// A spawn policy plus its per-call emission budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emitter {
    pub kind: EmitterKind,
    /// Maximum drops claimed per `maybe_emit` call
    pub limit: usize,
}

impl Emitter {
    pub fn rain(left: i32, right: i32) -> Self {
        Self {
            kind: EmitterKind::Rain {
                left: left.min(right),
                right: left.max(right),
            },
            limit: RAIN_LIMIT,
        }
    }

    pub fn sprinkler(location: Vec2) -> Self {
        Self {
            kind: EmitterKind::Sprinkler { location },
            limit: SPRINKLER_LIMIT,
        }
    }

    pub fn shower(location: Vec2) -> Self {
        Self {
            kind: EmitterKind::Shower { location },
            limit: SHOWER_LIMIT,
        }
    }

    pub fn multi_shower(height: f32, left: f32, right: f32, count: u32) -> Self {
        Self {
            kind: EmitterKind::MultiShower {
                height,
                left,
                right,
                count,
            },
            limit: MULTI_SHOWER_LIMIT,
        }
    }

    /// Override the per-call budget. Zero turns the emitter off.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Move the spawn point of a sprinkler or shower. Returns false for
    /// kinds without a single spawn point.
    pub fn set_location(&mut self, new_location: Vec2) -> bool {
        match &mut self.kind {
            EmitterKind::Sprinkler { location } | EmitterKind::Shower { location } => {
                *location = new_location;
                true
            }
            _ => false,
        }
    }

    /// Claim up to `limit` free drops, in pool order, and spawn them.
    ///
    /// Drops that are already in use are never touched. Returns how many
    /// drops were claimed: `min(limit, free slots)`.
    pub fn maybe_emit<R: Rng>(&self, pool: &mut DropPool, rng: &mut R) -> usize {
        let mut remaining = self.limit;
        for i in 0..pool.capacity() {
            if remaining == 0 {
                break;
            }
            let Some(mut drop) = pool.get(i) else {
                break;
            };
            if drop.in_use {
                continue;
            }
            drop.in_use = true;
            self.do_emit(&mut drop, rng);
            pool.set(i, drop);
            remaining -= 1;
        }
        self.limit - remaining
    }

    /// Assign spawn location and velocity for a freshly claimed drop
    fn do_emit<R: Rng>(&self, drop: &mut Drop, rng: &mut R) {
        match self.kind {
            EmitterKind::Rain { left, right } => {
                // `kind` is public, so bounds may arrive reversed
                let (lo, hi) = (left.min(right), left.max(right));
                drop.location.x = rng.random_range(lo..=hi) as f32;
                drop.location.y = rng.random_range(0.0..=4.0);
                drop.velocity.x = RAIN_DRIFT;
                drop.velocity.y = rng.random_range(0.0..=2.0);
            }
            EmitterKind::Sprinkler { location } => {
                drop.location = location;
                drop.velocity.y = rng.random_range(-1.0..=0.1);
                drop.velocity.x = rng.random_range(-1.0..=1.0);
            }
            EmitterKind::Shower { location } => {
                drop.location = location;
                drop.velocity.y = rng.random_range(0.1..=1.0);
                drop.velocity.x = rng.random_range(-0.25..=0.25);
            }
            EmitterKind::MultiShower {
                height,
                left,
                right,
                count,
            } => {
                let head = rng.random_range(0..=count);
                drop.location.x = left + head as f32 * head_spacing(left, right, count);
                drop.location.y = height;
                drop.velocity.y = rng.random_range(0.1..=1.0);
                drop.velocity.x = rng.random_range(-0.1..=0.1);
            }
        }
    }
}

/// Distance between neighbouring shower heads. A zero head count collapses
/// everything onto `left`.
fn head_spacing(left: f32, right: f32, count: u32) -> f32 {
    if count == 0 {
        0.0
    } else {
        (right - left) / count as f32
    }
}
