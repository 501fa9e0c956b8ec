//! Raindrops - drop emission and deflection for tiny screens
//!
//! Core modules:
//! - `sim`: Geometry, drops, emitters, deflectors and the reference tick
//! - `settings`: Data-driven scene description (JSON)
//! - `error`: Error type shared by construction and loading paths

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::SceneConfig;

/// Simulation tuning constants
pub mod consts {
    /// Absolute/relative epsilon used by the tolerance predicates
    pub const TOLERANCE: f32 = 0.01;

    /// Default restitution-and-reflection coefficient for bounces.
    /// A visual tuning knob; values above 1.0 overshoot on purpose.
    pub const RESTITUTION: f32 = 1.4;

    /// Default per-call emission limits
    pub const RAIN_LIMIT: usize = 5;
    pub const SPRINKLER_LIMIT: usize = 3;
    pub const SHOWER_LIMIT: usize = 3;
    pub const MULTI_SHOWER_LIMIT: usize = 3;

    /// Horizontal drift given to every rain drop
    pub const RAIN_DRIFT: f32 = 0.25;

    /// Default screen (128x64 monochrome handheld)
    pub const SCREEN_WIDTH: f32 = 128.0;
    pub const SCREEN_HEIGHT: f32 = 64.0;
    pub const DEFAULT_POOL_CAPACITY: usize = 60;

    /// Largest accepted visible-area side, in pixels
    pub const MAX_BOUNDS_EXTENT: f32 = 4096.0;
}
