//! One visual session: owns the morph engine, both estimators and the
//! composer, and sequences them once per frame.
//!
//! Frontends push whatever inputs arrived since the previous frame through
//! [`FrameInput`]; anything missing takes the estimators' decay branch.

use crate::audio::{AudioBandEstimator, AudioBandState};
use crate::compose::{sanitize_dt, Composer, FrameSignals, RenderUniforms};
use crate::config::Configuration;
use crate::constants::MAX_FRAME_DT;
use crate::error::{ConfigError, DeviceError, DeviceKind};
use crate::gesture::{GestureEstimator, GestureState, LandmarkInput};
use crate::morph::MorphEngine;
use crate::state::Camera;
use glam::Vec2;
use instant::Instant;

/// Inputs that arrived since the previous frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Byte frequency spectrum of the playing source, if any.
    pub spectrum: Option<&'a [u8]>,
    /// Byte waveform from the microphone, if any.
    pub waveform: Option<&'a [u8]>,
    pub landmarks: LandmarkInput<'a>,
    /// Pointer in normalized device coordinates.
    pub pointer: Option<Vec2>,
}

impl Default for FrameInput<'_> {
    fn default() -> Self {
        Self {
            dt: 0.0,
            spectrum: None,
            waveform: None,
            landmarks: LandmarkInput::Unchanged,
            pointer: None,
        }
    }
}

/// What the UI should fall back to after a device was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFallback {
    /// No camera: steer with the pointer only.
    PointerOnly,
    /// No microphone: react to the playing source only.
    SpectrumOnly,
}

pub struct Session {
    morph: MorphEngine,
    audio: AudioBandEstimator,
    gesture: GestureEstimator,
    composer: Composer,
    time: f32,
    camera_lost: bool,
    microphone_lost: bool,
}

impl Session {
    pub fn new(config: &Configuration) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::random())
    }

    /// Build a session whose random draws (heart points, particle sizes and
    /// seeds) come from `seed`.
    pub fn with_seed(config: &Configuration, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let morph = MorphEngine::new(config.shape, config.count, seed)?;
        log::info!("[session] started shape={} count={}", config.shape, config.count);
        Ok(Self {
            morph,
            audio: AudioBandEstimator::new(),
            gesture: GestureEstimator::new(),
            composer: Composer::new(config),
            time: 0.0,
            camera_lost: false,
            microphone_lost: false,
        })
    }

    pub fn morph(&self) -> &MorphEngine {
        &self.morph
    }

    pub fn audio(&self) -> &AudioBandState {
        self.audio.state()
    }

    pub fn gesture(&self) -> &GestureState {
        self.gesture.state()
    }

    pub fn uniforms(&self) -> &RenderUniforms {
        self.composer.uniforms()
    }

    pub fn camera(&self) -> &Camera {
        self.composer.camera()
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.composer.set_camera(camera);
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Run one frame. On an invalid configuration the previous cloud keeps
    /// rendering and the error is returned for the UI to surface.
    pub fn tick(&mut self, config: &Configuration, input: FrameInput<'_>) -> Result<&RenderUniforms, ConfigError> {
        let dt = sanitize_dt(input.dt);
        let synced = self.composer.sync_configuration(config, &mut self.morph);

        self.time += dt;
        self.morph.advance(dt);
        self.audio.update(input.spectrum, input.waveform);
        self.gesture.update(input.landmarks);

        let signals = FrameSignals {
            time: self.time,
            dt,
            audio: self.audio.state(),
            gesture: self.gesture.state(),
            morph_factor: self.morph.factor(),
            pointer: input.pointer,
        };
        self.composer.compose(&signals);
        synced?;
        Ok(self.composer.uniforms())
    }

    pub fn start_camera(&mut self) -> bool {
        if self.camera_lost {
            log::warn!("[session] camera unavailable for this session");
            return false;
        }
        self.gesture.start();
        true
    }

    /// Release gesture tracking; hands are forgotten immediately.
    pub fn stop_camera(&mut self) {
        self.gesture.stop();
    }

    pub fn start_microphone(&mut self, sensitivity: f32) -> bool {
        if self.microphone_lost {
            log::warn!("[session] microphone unavailable for this session");
            return false;
        }
        self.audio.enable_microphone(sensitivity);
        true
    }

    pub fn stop_microphone(&mut self) {
        self.audio.disable_microphone();
    }

    pub fn set_microphone_sensitivity(&mut self, sensitivity: f32) {
        self.audio.set_sensitivity(sensitivity);
    }

    pub fn microphone_enabled(&self) -> bool {
        self.audio.mic_enabled()
    }

    pub fn camera_active(&self) -> bool {
        self.gesture.is_active()
    }

    /// Record a failed device. That input stays in decay-only mode for the
    /// rest of the session; the returned fallback tells the UI what remains.
    pub fn device_unavailable(&mut self, err: &DeviceError) -> InputFallback {
        log::warn!("[session] {}", err);
        match err.device() {
            DeviceKind::Camera => {
                self.camera_lost = true;
                self.gesture.stop();
                InputFallback::PointerOnly
            }
            DeviceKind::Microphone => {
                self.microphone_lost = true;
                self.audio.disable_microphone();
                InputFallback::SpectrumOnly
            }
        }
    }
}

/// Wall-clock frame delta source.
#[derive(Clone, Debug)]
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }

    /// Seconds since the previous call, clamped to [0, 0.25].
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt.clamp(0.0, MAX_FRAME_DT)
    }
}
