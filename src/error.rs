//! Error types for scene construction and loading.
//!
//! The geometric core itself never fails; these errors come from rejecting
//! bad obstacle geometry and from reading scene files.

use std::fmt;

use glam::Vec2;

/// Errors that can occur while building or loading a simulation.
#[derive(Debug)]
pub enum SimError {
    /// A deflector was built from a zero-length segment (its normal is undefined).
    DegenerateSegment { start: Vec2, end: Vec2 },
    /// A scene description failed validation.
    InvalidConfig(String),
    /// Failed to read a scene file from disk.
    Io(std::io::Error),
    /// Failed to parse scene JSON.
    Parse(serde_json::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::DegenerateSegment { start, end } => write!(
                f,
                "Deflector segment ({}, {}) -> ({}, {}) has zero length",
                start.x, start.y, end.x, end.y
            ),
            SimError::InvalidConfig(msg) => write!(f, "Invalid scene: {}", msg),
            SimError::Io(e) => write!(f, "Failed to read scene file: {}", e),
            SimError::Parse(e) => write!(f, "Failed to parse scene JSON: {}", e),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(e) => Some(e),
            SimError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Parse(e)
    }
}
