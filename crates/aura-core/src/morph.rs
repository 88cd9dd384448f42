//! Shape morphing: owns the particle cloud and the blend factor between its
//! `current` and `target` buffers.
//!
//! On every shape change the engine first bakes the visible (interpolated)
//! positions into `current`, then samples the new shape into `target` and
//! restarts the blend from 0. The shading stage always mixes the two buffers
//! by [`MorphEngine::factor`], so consumers never see a positional jump.

use crate::cloud::ParticleCloud;
use crate::config::Shape;
use crate::constants::MORPH_DURATION_SEC;
use crate::error::ConfigError;
use crate::sampler;
use crate::tween::{Easing, Tween};
use rand::prelude::*;

/// Snapshot of the blend between `current` and `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphState {
    pub factor: f32,
}

impl MorphState {
    pub fn at_rest(&self) -> bool {
        self.factor >= 1.0
    }
}

pub struct MorphEngine {
    cloud: ParticleCloud,
    shape: Shape,
    tween: Tween,
    rng: StdRng,
    // Bumped whenever the buffers change so renderers know to re-upload.
    generation: u64,
}

impl MorphEngine {
    /// Build a cloud for `shape` that starts at rest (factor 1).
    pub fn new(shape: Shape, count: usize, seed: u64) -> Result<Self, ConfigError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let cloud = ParticleCloud::new(shape, count, &mut rng)?;
        log::info!("[morph] new cloud shape={} count={}", shape, count);
        Ok(Self {
            cloud,
            shape,
            tween: Tween::finished(MORPH_DURATION_SEC, Easing::CubicInOut),
            rng,
            generation: 0,
        })
    }

    pub fn cloud(&self) -> &ParticleCloud {
        &self.cloud
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn count(&self) -> usize {
        self.cloud.len()
    }

    pub fn factor(&self) -> f32 {
        self.tween.value()
    }

    pub fn state(&self) -> MorphState {
        MorphState {
            factor: self.factor(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Begin a morph toward `shape` from wherever the particles are now.
    pub fn retarget(&mut self, shape: Shape) -> Result<(), ConfigError> {
        let next = sampler::generate_with_rng(shape, self.cloud.len(), &mut self.rng)?;
        self.cloud.current = self.cloud.mixed(self.factor());
        self.cloud.target = next;
        self.shape = shape;
        self.tween.restart();
        self.generation += 1;
        log::info!("[morph] retarget shape={} count={}", shape, self.cloud.len());
        Ok(())
    }

    /// Rebuild every buffer for a new particle count, resting on `shape`.
    pub fn resize(&mut self, shape: Shape, count: usize) -> Result<(), ConfigError> {
        let cloud = ParticleCloud::new(shape, count, &mut self.rng)?;
        self.cloud = cloud;
        self.shape = shape;
        self.tween = Tween::finished(MORPH_DURATION_SEC, Easing::CubicInOut);
        self.generation += 1;
        log::info!("[morph] resize shape={} count={}", shape, count);
        Ok(())
    }

    /// Advance the blend animation by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tween.advance(dt);
    }

    /// Positions as currently shown (before gesture/noise displacement).
    pub fn mixed_positions(&self) -> Vec<glam::Vec3> {
        self.cloud.mixed(self.factor())
    }
}
