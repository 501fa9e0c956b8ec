//! Fixed-step simulation tick
//!
//! Reference host loop: owns the pool, the emitters, the deflectors and the
//! seeded RNG, and drives them in a fixed order every tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::deflector::Deflector;
use super::drop::DropPool;
use super::emitter::Emitter;
use super::line::Line;

/// Visible area. Drops that leave `[0, width] x [0, height]` are recycled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && x <= self.width && y >= 0.0 && y <= self.height
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Drops claimed by emitters
    pub emitted: usize,
    /// Drops that hit at least one deflector
    pub deflected: usize,
    /// Drops returned to the pool for leaving the visible area
    pub recycled: usize,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub pool: DropPool,
    pub emitters: Vec<Emitter>,
    pub deflectors: Vec<Deflector>,
    /// `None` disables recycling
    pub bounds: Option<Bounds>,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
    /// Reused for every drop path so the hot loop doesn't allocate
    scratch: Line,
}

impl World {
    pub fn new(pool_capacity: usize, seed: u64) -> Self {
        Self {
            pool: DropPool::new(pool_capacity),
            emitters: Vec::new(),
            deflectors: Vec::new(),
            bounds: None,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            scratch: Line::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn add_emitter(&mut self, emitter: Emitter) {
        self.emitters.push(emitter);
    }

    pub fn add_deflector(&mut self, deflector: Deflector) {
        self.deflectors.push(deflector);
    }

    /// Advance one tick: emit, deflect, move, recycle. The order is fixed so
    /// that a seeded run replays identically.
    pub fn tick(&mut self) -> TickStats {
        let mut stats = TickStats::default();
        self.time_ticks += 1;

        // Contact from the previous tick has been seen by the renderer by now
        self.pool.clear_collisions();

        for emitter in &self.emitters {
            stats.emitted += emitter.maybe_emit(&mut self.pool, &mut self.rng);
        }

        for i in 0..self.pool.capacity() {
            let Some(mut drop) = self.pool.get(i) else {
                continue;
            };
            if !drop.in_use {
                continue;
            }

            for deflector in &self.deflectors {
                deflector.maybe_deflect(&mut drop, &mut self.scratch);
            }

            if drop.collided {
                stats.deflected += 1;
            } else {
                drop.location += drop.velocity;
            }
            self.pool.set(i, drop);

            if let Some(bounds) = self.bounds {
                if !bounds.contains(drop.location.x, drop.location.y) {
                    self.pool.release(i);
                    stats.recycled += 1;
                }
            }
        }

        log::debug!(
            "tick {}: emitted={} deflected={} recycled={} live={}",
            self.time_ticks,
            stats.emitted,
            stats.deflected,
            stats.recycled,
            self.pool.in_use_count()
        );

        stats
    }

    /// Run `ticks` ticks and sum their stats
    pub fn run(&mut self, ticks: u32) -> TickStats {
        let mut total = TickStats::default();
        for _ in 0..ticks {
            let stats = self.tick();
            total.emitted += stats.emitted;
            total.deflected += stats.deflected;
            total.recycled += stats.recycled;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Drop;
    use glam::Vec2;

    #[test]
    fn test_tick_emits_and_advances() {
        let mut world = World::new(10, 12345);
        world.add_emitter(Emitter::shower(Vec2::new(5.0, 5.0)).with_limit(1));

        let stats = world.tick();
        assert_eq!(stats.emitted, 1);
        let drop = world.pool.get(0).unwrap();
        // Spawned and moved in the same tick
        assert!(drop.in_use);
        assert!(drop.location.y > 5.0);
        assert_eq!(world.time_ticks, 1);
    }

    #[test]
    fn test_deflected_drop_does_not_advance() {
        let mut world = World::new(1, 1);
        world.add_deflector(Deflector::line(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0)).unwrap());
        world.pool.set(
            0,
            Drop {
                location: Vec2::new(4.0, 9.0),
                velocity: Vec2::new(0.5, 2.0),
                collided: false,
                in_use: true,
            },
        );

        let stats = world.tick();
        assert_eq!(stats.deflected, 1);
        let drop = world.pool.get(0).unwrap();
        assert!(drop.collided);
        assert_eq!(drop.location, Vec2::new(4.0, 9.0));
        assert!(drop.velocity.y < 0.0);

        // Next tick the flag is cleared and the drop moves away
        let stats = world.tick();
        assert_eq!(stats.deflected, 0);
        let drop = world.pool.get(0).unwrap();
        assert!(!drop.collided);
        assert!(drop.location.y < 9.0);
    }

    #[test]
    fn test_second_deflector_sees_reflected_velocity() {
        let mut world = World::new(1, 1);
        // Floor at y = 10, then a diagonal the drop only reaches after bouncing
        world.add_deflector(Deflector::line(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0)).unwrap());
        world.add_deflector(Deflector::line(Vec2::new(4.0, 8.0), Vec2::new(6.0, 9.0)).unwrap());
        world.pool.set(
            0,
            Drop {
                location: Vec2::new(4.0, 9.0),
                velocity: Vec2::new(0.5, 2.0),
                collided: false,
                in_use: true,
            },
        );

        let stats = world.tick();
        assert_eq!(stats.deflected, 1);
        let drop = world.pool.get(0).unwrap();
        assert!(drop.collided);

        // Floor turns (0.5, 2.0) into (0.5, -0.8); the diagonal then bounces that
        let normal = Vec2::new(-1.0, 2.0).normalize();
        let after_floor = Vec2::new(0.5, -0.8);
        let expected = after_floor - 1.4 * after_floor.dot(normal) * normal;
        assert!((drop.velocity - expected).length() < 0.0001);
        assert_eq!(drop.location, Vec2::new(4.0, 9.0));
    }

    #[test]
    fn test_recycle_outside_bounds() {
        let mut world = World::new(2, 1).with_bounds(Bounds::new(20.0, 20.0));
        world.pool.set(
            0,
            Drop {
                location: Vec2::new(10.0, 19.5),
                velocity: Vec2::new(0.0, 1.0),
                collided: false,
                in_use: true,
            },
        );
        world.pool.set(
            1,
            Drop {
                location: Vec2::new(10.0, 5.0),
                velocity: Vec2::new(0.0, 1.0),
                collided: false,
                in_use: true,
            },
        );

        let stats = world.tick();
        assert_eq!(stats.recycled, 1);
        assert!(!world.pool.get(0).unwrap().in_use);
        assert!(world.pool.get(1).unwrap().in_use);
    }

    #[test]
    fn test_no_bounds_never_recycles() {
        let mut world = World::new(5, 3);
        world.add_emitter(Emitter::rain(0, 10));
        let stats = world.run(50);
        assert_eq!(stats.recycled, 0);
        assert_eq!(world.pool.in_use_count(), 5);
    }

    #[test]
    fn test_determinism() {
        let build = || {
            let mut world = World::new(40, 99999).with_bounds(Bounds::new(128.0, 64.0));
            world.add_emitter(Emitter::rain(0, 127));
            world.add_emitter(Emitter::sprinkler(Vec2::new(64.0, 40.0)));
            world.add_deflector(
                Deflector::line(Vec2::new(10.0, 30.0), Vec2::new(60.0, 40.0)).unwrap(),
            );
            world
        };
        let mut a = build();
        let mut b = build();

        let stats_a = a.run(200);
        let stats_b = b.run(200);

        assert_eq!(stats_a, stats_b);
        assert!(a.pool.iter().eq(b.pool.iter()));
    }
}
