//! Drops and the fixed-capacity pool that holds them
//!
//! Drops are plain `Copy` records. Anything that changes a drop reads the slot
//! by value, mutates the copy and writes it back by index.

use glam::Vec2;

use super::line::Line;

/// A single particle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Drop {
    pub location: Vec2,
    pub velocity: Vec2,
    /// Set by a deflector on the tick it makes contact; the host clears it
    pub collided: bool,
    /// Claimed by an emitter and still live
    pub in_use: bool,
}

impl Drop {
    /// Write this tick's travel path (location -> location + velocity) into `line`
    #[inline]
    pub fn to_line(&self, line: &mut Line) {
        line.update_from(self.location, self.location + self.velocity);
    }

    /// This tick's travel path as a fresh line
    pub fn path(&self) -> Line {
        Line::new(self.location, self.location + self.velocity)
    }
}

/// Fixed-capacity drop storage, addressed by index
#[derive(Debug, Clone)]
pub struct DropPool {
    drops: Box<[Drop]>,
}

impl DropPool {
    /// Allocate `capacity` unused drops. The pool never grows or shrinks.
    pub fn new(capacity: usize) -> Self {
        Self {
            drops: vec![Drop::default(); capacity].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.drops.len()
    }

    /// Copy of the drop in slot `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<Drop> {
        self.drops.get(index).copied()
    }

    /// Overwrite slot `index`. Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, index: usize, drop: Drop) {
        if let Some(slot) = self.drops.get_mut(index) {
            *slot = drop;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Drop> {
        self.drops.iter()
    }

    /// Indices and copies of every live drop
    pub fn in_use(&self) -> impl Iterator<Item = (usize, Drop)> + '_ {
        self.drops
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, d)| d.in_use)
    }

    pub fn in_use_count(&self) -> usize {
        self.drops.iter().filter(|d| d.in_use).count()
    }

    pub fn free_count(&self) -> usize {
        self.capacity() - self.in_use_count()
    }

    /// Return slot `index` to the pool
    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.drops.get_mut(index) {
            slot.in_use = false;
            slot.collided = false;
        }
    }

    /// Reset every `collided` flag (start of a host tick)
    pub fn clear_collisions(&mut self) {
        for drop in self.drops.iter_mut() {
            drop.collided = false;
        }
    }
}
