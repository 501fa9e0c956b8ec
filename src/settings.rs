//! Scene description
//!
//! A scene is the pool size, the visible area, the emitters and the obstacles.
//! Scenes are plain JSON so new layouts can be tried without recompiling.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;
use crate::sim::{Bounds, Deflector, Emitter, World};

/// One emitter entry in a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmitterConfig {
    Rain {
        left: i32,
        right: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<usize>,
    },
    Sprinkler {
        location: [f32; 2],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<usize>,
    },
    Shower {
        location: [f32; 2],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<usize>,
    },
    MultiShower {
        height: f32,
        left: f32,
        right: f32,
        count: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<usize>,
    },
}

impl EmitterConfig {
    fn limit(&self) -> Option<usize> {
        match self {
            EmitterConfig::Rain { limit, .. }
            | EmitterConfig::Sprinkler { limit, .. }
            | EmitterConfig::Shower { limit, .. }
            | EmitterConfig::MultiShower { limit, .. } => *limit,
        }
    }

    pub fn to_emitter(&self) -> Emitter {
        let emitter = match *self {
            EmitterConfig::Rain { left, right, .. } => Emitter::rain(left, right),
            EmitterConfig::Sprinkler { location, .. } => Emitter::sprinkler(Vec2::from(location)),
            EmitterConfig::Shower { location, .. } => Emitter::shower(Vec2::from(location)),
            EmitterConfig::MultiShower {
                height,
                left,
                right,
                count,
                ..
            } => Emitter::multi_shower(height, left, right, count),
        };
        match self.limit() {
            Some(limit) => emitter.with_limit(limit),
            None => emitter,
        }
    }
}

/// One obstacle entry in a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeflectorConfig {
    pub start: [f32; 2],
    pub end: [f32; 2],
    /// Overrides the scene-wide restitution for this obstacle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restitution: Option<f32>,
}

/// Complete scene description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// RNG seed for reproducible runs
    pub seed: u64,
    /// Number of drop slots
    pub pool_capacity: usize,
    /// Visible area; drops outside it are recycled. `None` keeps them forever.
    pub bounds: Option<Bounds>,
    /// Bounce coefficient for obstacles that don't set their own
    pub restitution: f32,
    pub emitters: Vec<EmitterConfig>,
    pub deflectors: Vec<DeflectorConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            pool_capacity: DEFAULT_POOL_CAPACITY,
            bounds: Some(Bounds::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
            restitution: RESTITUTION,
            emitters: vec![EmitterConfig::Rain {
                left: 0,
                right: SCREEN_WIDTH as i32 - 1,
                limit: None,
            }],
            // Two awnings sloping toward the middle
            deflectors: vec![
                DeflectorConfig {
                    start: [8.0, 24.0],
                    end: [56.0, 36.0],
                    restitution: None,
                },
                DeflectorConfig {
                    start: [72.0, 44.0],
                    end: [120.0, 30.0],
                    restitution: None,
                },
            ],
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let scene: SceneConfig = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Read and validate a scene file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let scene = Self::from_json(&json)?;
        log::info!(
            "Loaded scene from {}: {} emitters, {} deflectors",
            path.display(),
            scene.emitters.len(),
            scene.deflectors.len()
        );
        Ok(scene)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject scenes the simulation can't run sensibly
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.restitution.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "restitution must be finite, got {}",
                self.restitution
            )));
        }
        if let Some(bounds) = self.bounds {
            if !(bounds.width > 0.0 && bounds.height > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "bounds must be positive, got {}x{}",
                    bounds.width, bounds.height
                )));
            }
            if bounds.width > MAX_BOUNDS_EXTENT || bounds.height > MAX_BOUNDS_EXTENT {
                return Err(SimError::InvalidConfig(format!(
                    "bounds {}x{} exceed the {} pixel limit",
                    bounds.width, bounds.height, MAX_BOUNDS_EXTENT
                )));
            }
        }
        for (i, emitter) in self.emitters.iter().enumerate() {
            if let EmitterConfig::MultiShower { count: 0, .. } = emitter {
                return Err(SimError::InvalidConfig(format!(
                    "emitter {}: multi_shower needs at least one head spacing (count > 0)",
                    i
                )));
            }
        }
        for (i, d) in self.deflectors.iter().enumerate() {
            if d.start == d.end {
                return Err(SimError::InvalidConfig(format!(
                    "deflector {}: start and end are the same point",
                    i
                )));
            }
            if let Some(r) = d.restitution {
                if !r.is_finite() {
                    return Err(SimError::InvalidConfig(format!(
                        "deflector {}: restitution must be finite",
                        i
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build a ready-to-tick world from this scene
    pub fn build(&self) -> Result<World, SimError> {
        self.validate()?;

        let mut world = World::new(self.pool_capacity, self.seed);
        world.bounds = self.bounds;

        for config in &self.emitters {
            world.add_emitter(config.to_emitter());
        }
        for config in &self.deflectors {
            let deflector = Deflector::line(Vec2::from(config.start), Vec2::from(config.end))?
                .with_restitution(config.restitution.unwrap_or(self.restitution));
            world.add_deflector(deflector);
        }

        log::info!(
            "Built world: pool={} emitters={} deflectors={} seed={}",
            self.pool_capacity,
            world.emitters.len(),
            world.deflectors.len(),
            self.seed
        );

        Ok(world)
    }
}
