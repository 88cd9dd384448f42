use crate::config::Shape;
use crate::constants::{PARTICLE_SIZE_BASE, PARTICLE_SIZE_EXP, PARTICLE_SIZE_SPAN};
use crate::error::ConfigError;
use crate::gpu::ParticleInstance;
use crate::sampler;
use glam::Vec3;
use rand::Rng;

/// Per-particle buffers for one visual session.
///
/// All four vectors have the same length. `sizes` and `seeds` are drawn once
/// when the cloud is built and never change afterwards.
#[derive(Clone, Debug)]
pub struct ParticleCloud {
    pub current: Vec<Vec3>,
    pub target: Vec<Vec3>,
    pub sizes: Vec<f32>,
    pub seeds: Vec<f32>,
}

impl ParticleCloud {
    /// Build a cloud resting on `shape` (current == target).
    pub fn new<R: Rng + ?Sized>(shape: Shape, count: usize, rng: &mut R) -> Result<Self, ConfigError> {
        let initial = sampler::generate_with_rng(shape, count, rng)?;
        let sizes = (0..count)
            .map(|_| PARTICLE_SIZE_BASE + rng.gen::<f32>().powf(PARTICLE_SIZE_EXP) * PARTICLE_SIZE_SPAN)
            .collect();
        let seeds = (0..count).map(|_| rng.gen::<f32>()).collect();
        Ok(Self {
            current: initial.clone(),
            target: initial,
            sizes,
            seeds,
        })
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Interpolated positions at `factor`.
    pub fn mixed(&self, factor: f32) -> Vec<Vec3> {
        self.current
            .iter()
            .zip(&self.target)
            .map(|(c, t)| *c + (*t - *c) * factor)
            .collect()
    }

    /// Pack the attributes for a GPU instance buffer.
    pub fn instances(&self) -> Vec<ParticleInstance> {
        (0..self.len())
            .map(|i| ParticleInstance {
                current: self.current[i].to_array(),
                size: self.sizes[i],
                target: self.target[i].to_array(),
                seed: self.seeds[i],
            })
            .collect()
    }
}
