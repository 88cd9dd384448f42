//! Error types surfaced by the core.
//!
//! Only configuration problems and unavailable capture devices are errors.
//! Numeric instability and missing samples are handled where they occur.

use thiserror::Error;

/// A configuration the core refuses to build a particle cloud from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown shape '{0}' (expected sphere, heart, flower, saturn or fireworks)")]
    UnknownShape(String),
    #[error("particle count must be positive, got {0}")]
    InvalidCount(usize),
    #[error("particle size must be finite and > 0, got {0}")]
    InvalidSize(f32),
    #[error("noise strength must be finite and >= 0, got {0}")]
    InvalidNoise(f32),
    #[error("invalid color '{0}' (expected #rrggbb)")]
    InvalidColor(String),
}

/// Capture device kinds the session can lose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Camera,
    Microphone,
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceKind::Camera => f.write_str("camera"),
            DeviceKind::Microphone => f.write_str("microphone"),
        }
    }
}

/// A capture device could not be acquired or stopped working.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("{0} permission denied")]
    PermissionDenied(DeviceKind),
    #[error("{device} unavailable: {reason}")]
    Unavailable { device: DeviceKind, reason: String },
}

impl DeviceError {
    pub fn device(&self) -> DeviceKind {
        match self {
            DeviceError::PermissionDenied(d) => *d,
            DeviceError::Unavailable { device, .. } => *device,
        }
    }
}
