//! Deterministic drop simulation
//!
//! Everything that moves drops lives here. This module must stay deterministic:
//! - Injected, seeded RNG only
//! - Stable iteration order (by pool index)
//! - No rendering or platform dependencies

pub mod deflector;
pub mod drop;
pub mod emitter;
pub mod line;
pub mod tolerance;
pub mod world;

pub use deflector::{Deflector, LineDeflector, calculate_bounce};
pub use drop::{Drop, DropPool};
pub use emitter::{Emitter, EmitterKind};
pub use line::{Line, NormalLine};
pub use tolerance::{approx_eq, approx_ge, approx_le, in_range_inclusive};
pub use world::{Bounds, TickStats, World};
