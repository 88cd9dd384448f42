//! User-facing configuration written by the UI and read by the core.

use crate::constants::{DEFAULT_COLOR_HEX, DEFAULT_COUNT, DEFAULT_NOISE, DEFAULT_SIZE};
use crate::error::ConfigError;
use glam::Vec3;
use std::fmt;
use std::str::FromStr;

/// Procedural shape families known to the point sampler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Shape {
    #[default]
    Sphere,
    Heart,
    Flower,
    Saturn,
    Fireworks,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Sphere,
        Shape::Heart,
        Shape::Flower,
        Shape::Saturn,
        Shape::Fireworks,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Shape::Sphere => "sphere",
            Shape::Heart => "heart",
            Shape::Flower => "flower",
            Shape::Saturn => "saturn",
            Shape::Fireworks => "fireworks",
        }
    }

    /// Only the heart draws from an RNG; every other family is Halton-based.
    pub fn is_deterministic(self) -> bool {
        !matches!(self, Shape::Heart)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownShape(s.to_string()))
    }
}

/// Linear RGB color with components in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) swatch string.
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidColor(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ConfigError::InvalidColor(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    pub fn from_vec3(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

impl Default for Rgb {
    fn default() -> Self {
        // 0x00, 0xf3, 0xff
        Self::new(0.0, 243.0 / 255.0, 1.0)
    }
}

/// Visual parameters controlled by the (external) UI.
///
/// The core treats this as a read-only snapshot per frame; changes are found
/// by diffing against the previous frame's snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    pub shape: Shape,
    pub color: Rgb,
    pub size: f32,
    pub noise: f32,
    pub count: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            shape: Shape::Sphere,
            color: Rgb::from_hex(DEFAULT_COLOR_HEX).unwrap_or_default(),
            size: DEFAULT_SIZE,
            noise: DEFAULT_NOISE,
            count: DEFAULT_COUNT,
        }
    }
}

impl Configuration {
    /// Reject values the sampler or the composer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::InvalidCount(self.count));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ConfigError::InvalidSize(self.size));
        }
        if !self.noise.is_finite() || self.noise < 0.0 {
            return Err(ConfigError::InvalidNoise(self.noise));
        }
        if !self.color.is_finite() {
            return Err(ConfigError::InvalidColor(format!("{:?}", self.color)));
        }
        Ok(())
    }

    /// Fields that differ from `previous`.
    pub fn diff(&self, previous: &Configuration) -> ConfigChanges {
        ConfigChanges {
            shape: self.shape != previous.shape,
            count: self.count != previous.count,
            color: self.color != previous.color,
            size: self.size != previous.size,
            noise: self.noise != previous.noise,
        }
    }
}

/// Result of [`Configuration::diff`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigChanges {
    pub shape: bool,
    pub count: bool,
    pub color: bool,
    pub size: bool,
    pub noise: bool,
}

impl ConfigChanges {
    pub fn any(&self) -> bool {
        self.shape || self.count || self.color || self.size || self.noise
    }
}
