//! Render uniform composer: merges configuration, morph state, signal
//! estimates and the pointer into one finite uniform snapshot per frame.

use crate::audio::AudioBandState;
use crate::config::{ConfigChanges, Configuration};
use crate::constants::*;
use crate::error::ConfigError;
use crate::gesture::GestureState;
use crate::morph::MorphEngine;
use crate::state::Camera;
use crate::tween::ColorTween;
use glam::{EulerRot, Mat4, Vec2, Vec3};

/// Frame-rate independent exponential approach of `current` toward `target`.
#[inline]
pub fn damp(current: f32, target: f32, speed: f32, dt: f32) -> f32 {
    current + (target - current) * (1.0 - (-speed * dt).exp())
}

/// Clamp a frame delta to something the damping and tweens can use.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}

/// Everything the shading stage needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderUniforms {
    pub time: f32,
    pub size: f32,
    pub color: Vec3,
    pub gesture_scale: f32,
    pub gesture_spread: f32,
    pub noise_strength: f32,
    pub mouse: Vec3,
    pub beat_signal: f32,
    pub morph_factor: f32,
    /// Damped Euler rotation (XYZ) of the whole cloud.
    pub rotation: Vec3,
}

impl RenderUniforms {
    /// Values used before the first frame and as the last-resort fallback.
    pub fn defaults(config: &Configuration) -> Self {
        Self {
            time: 0.0,
            size: config.size.min(MAX_PARTICLE_SIZE),
            color: config.color.to_vec3(),
            gesture_scale: 1.0,
            gesture_spread: 0.0,
            noise_strength: config.noise,
            mouse: pointer_offscreen_vec3(),
            beat_signal: 0.0,
            morph_factor: 1.0,
            rotation: Vec3::ZERO,
        }
    }

    pub fn is_finite(&self) -> bool {
        [
            self.time,
            self.size,
            self.gesture_scale,
            self.gesture_spread,
            self.noise_strength,
            self.beat_signal,
            self.morph_factor,
        ]
        .iter()
        .all(|v| v.is_finite())
            && self.color.is_finite()
            && self.mouse.is_finite()
            && self.rotation.is_finite()
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

/// Upstream state read by [`Composer::compose`].
#[derive(Clone, Copy, Debug)]
pub struct FrameSignals<'a> {
    pub time: f32,
    pub dt: f32,
    pub audio: &'a AudioBandState,
    pub gesture: &'a GestureState,
    pub morph_factor: f32,
    /// Pointer in normalized device coordinates, `None` when outside the view.
    pub pointer: Option<Vec2>,
}

fn keep_finite(field: &str, value: &mut f32, last: f32, fallback: f32) {
    if !value.is_finite() {
        log::debug!("[compose] non-finite {} recovered", field);
        *value = if last.is_finite() { last } else { fallback };
    }
}

fn keep_finite_vec3(field: &str, value: &mut Vec3, last: Vec3, fallback: Vec3) {
    if !value.is_finite() {
        log::debug!("[compose] non-finite {} recovered", field);
        *value = if last.is_finite() { last } else { fallback };
    }
}

pub struct Composer {
    uniforms: RenderUniforms,
    camera: Camera,
    color: ColorTween,
    previous: Configuration,
    last_rejected: Option<Configuration>,
    // Audio-modulated noise before the microphone boost.
    noise_level: f32,
}

impl Composer {
    pub fn new(config: &Configuration) -> Self {
        Self {
            uniforms: RenderUniforms::defaults(config),
            camera: Camera::default(),
            color: ColorTween::new(config.color.to_vec3(), COLOR_TWEEN_SEC),
            previous: config.clone(),
            last_rejected: None,
            noise_level: config.noise,
        }
    }

    pub fn uniforms(&self) -> &RenderUniforms {
        &self.uniforms
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// The last configuration that passed validation.
    pub fn configuration(&self) -> &Configuration {
        &self.previous
    }

    /// Diff `config` against last frame's snapshot and apply the changes:
    /// count -> rebuild the cloud, shape -> morph, color -> restart the fade.
    ///
    /// An invalid configuration is rejected and the previous one stays live.
    pub fn sync_configuration(
        &mut self,
        config: &Configuration,
        morph: &mut MorphEngine,
    ) -> Result<ConfigChanges, ConfigError> {
        if let Err(e) = config.validate() {
            if self.last_rejected.as_ref() != Some(config) {
                log::warn!("[compose] configuration rejected: {}", e);
                self.last_rejected = Some(config.clone());
            }
            return Err(e);
        }
        self.last_rejected = None;

        let changes = config.diff(&self.previous);
        if !changes.any() {
            return Ok(changes);
        }
        if changes.count {
            morph.resize(config.shape, config.count)?;
        } else if changes.shape {
            morph.retarget(config.shape)?;
        }
        if changes.color {
            self.color.retarget(config.color.to_vec3());
        }
        if changes.size {
            self.uniforms.size = config.size.min(MAX_PARTICLE_SIZE);
        }
        if changes.noise {
            self.noise_level = config.noise;
            self.uniforms.noise_strength = config.noise;
        }
        self.previous = config.clone();
        Ok(changes)
    }

    /// Build this frame's uniforms from the last accepted configuration.
    pub fn compose(&mut self, signals: &FrameSignals<'_>) -> &RenderUniforms {
        let config = self.previous.clone();
        let dt = sanitize_dt(signals.dt);
        let last = self.uniforms.clone();
        let defaults = RenderUniforms::defaults(&config);
        let audio = signals.audio;
        let gesture = signals.gesture;

        self.color.advance(dt);
        let mut next = last.clone();
        next.time = signals.time;
        next.color = self.color.current();
        next.morph_factor = signals.morph_factor.clamp(0.0, 1.0);
        next.beat_signal = audio.beat_signal;

        // Size and noise follow the music while it plays, then relax back.
        let base_size = config.size.min(MAX_PARTICLE_SIZE);
        if audio.energetic {
            let bass = audio.bass.min(BEAT_BASS_CAP);
            let target_size = (config.size * (1.0 + bass * SIZE_BASS_GAIN)).min(MAX_PARTICLE_SIZE);
            next.size = (last.size + (target_size - last.size) * SIZE_PUMP_RATE).max(MIN_PARTICLE_SIZE);
            let treble = (audio.treble + audio.rms * 0.5).min(1.0);
            let target_noise = config.noise + treble * NOISE_TREBLE_GAIN;
            self.noise_level += (target_noise - self.noise_level) * NOISE_PUMP_RATE;
        } else {
            next.size = (last.size + (config.size - last.size) * RELAX_RATE).min(MAX_PARTICLE_SIZE);
            self.noise_level += (config.noise - self.noise_level) * RELAX_RATE;
        }
        if !self.noise_level.is_finite() {
            self.noise_level = config.noise;
        }
        // The mic boost rides on top and never feeds back into the level.
        next.noise_strength = self.noise_level + audio.mic_influence * MIC_NOISE_GAIN;
        if !next.size.is_finite() {
            next.size = base_size;
        }

        next.mouse = signals
            .pointer
            .filter(|p| p.is_finite())
            .and_then(|p| self.camera.unproject_to_plane(p))
            .unwrap_or_else(pointer_offscreen_vec3);

        // Hands own the rotation; without them the cloud spins with the clock.
        let (mut target_spread, target_scale, target_rot) = if gesture.has_hands {
            (
                (gesture.spread - GESTURE_SPREAD_BIAS) * GESTURE_SPREAD_GAIN,
                gesture.scale,
                gesture.rotation,
            )
        } else {
            (0.0, 1.0, Vec3::new(0.0, signals.time * IDLE_SPIN_RAD_PER_SEC, 0.0))
        };
        target_spread += audio.mid * MID_SPREAD_GAIN;

        next.gesture_spread = damp(last.gesture_spread, target_spread, SPREAD_DAMP_SPEED, dt);
        next.gesture_scale = damp(last.gesture_scale, target_scale, SCALE_DAMP_SPEED, dt);
        next.rotation = Vec3::new(
            damp(last.rotation.x, target_rot.x, ROT_XY_DAMP_SPEED, dt),
            damp(last.rotation.y, target_rot.y, ROT_XY_DAMP_SPEED, dt),
            damp(last.rotation.z, target_rot.z, ROT_Z_DAMP_SPEED, dt),
        );

        keep_finite("time", &mut next.time, last.time, defaults.time);
        keep_finite("size", &mut next.size, last.size, defaults.size);
        keep_finite("gesture_scale", &mut next.gesture_scale, last.gesture_scale, defaults.gesture_scale);
        keep_finite("gesture_spread", &mut next.gesture_spread, last.gesture_spread, defaults.gesture_spread);
        keep_finite("noise_strength", &mut next.noise_strength, last.noise_strength, defaults.noise_strength);
        keep_finite("beat_signal", &mut next.beat_signal, last.beat_signal, defaults.beat_signal);
        keep_finite("morph_factor", &mut next.morph_factor, last.morph_factor, defaults.morph_factor);
        keep_finite_vec3("color", &mut next.color, last.color, defaults.color);
        keep_finite_vec3("mouse", &mut next.mouse, last.mouse, defaults.mouse);
        keep_finite_vec3("rotation", &mut next.rotation, last.rotation, defaults.rotation);

        self.uniforms = next;
        &self.uniforms
    }
}
