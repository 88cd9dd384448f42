use glam::Vec3;

// Shared visual/signal tuning constants used by the core and the frontends.

// Scene layout
pub const CAMERA_Z: f32 = 9.0; // eye distance on +Z, looking at the origin
pub const CAMERA_FOVY_DEG: f32 = 55.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;
pub const POINTER_UNPROJECT_DEPTH: f32 = 0.5; // NDC depth used to build the pointer ray
pub const POINTER_OFFSCREEN: [f32; 3] = [999.0, 999.0, 999.0]; // repulsion center when no pointer

// Configuration defaults
pub const DEFAULT_COLOR_HEX: &str = "#00f3ff";
pub const DEFAULT_SIZE: f32 = 2.0;
pub const DEFAULT_NOISE: f32 = 0.45;
pub const DEFAULT_COUNT: usize = 8000;
pub const MAX_PARTICLE_SIZE: f32 = 3.5; // uniform size ceiling
pub const MIN_PARTICLE_SIZE: f32 = 0.3; // floor while audio pumps the size

// Point sampler
pub const SPHERE_RADIUS: f32 = 4.0;
pub const SPHERE_JITTER_MIN: f32 = 0.86;
pub const HEART_SCALE: f32 = 0.25;
pub const FLOWER_PETALS: f32 = 5.0;
pub const SATURN_PLANET_RATIO: f32 = 0.42;
pub const SATURN_PLANET_RADIUS: f32 = 2.05;
pub const SATURN_RING_INNER: f32 = 3.0;
pub const SATURN_RING_WIDTH: f32 = 2.6;
pub const SATURN_RING_TILT: f32 = 0.45; // radians about +X
pub const FIREWORKS_SHELL: f32 = 4.05;
pub const FIREWORKS_SHELL_JITTER: f32 = 0.55;
pub const FIREWORKS_TRAIL_MIN: f32 = 0.18;

// Per-particle attributes: size = base + u^exp * span
pub const PARTICLE_SIZE_BASE: f32 = 0.65;
pub const PARTICLE_SIZE_SPAN: f32 = 0.45;
pub const PARTICLE_SIZE_EXP: f32 = 0.35;

// Morph / color transitions (seconds)
pub const MORPH_DURATION_SEC: f32 = 1.5;
pub const COLOR_TWEEN_SEC: f32 = 0.5;

// Audio band estimator
pub const BASS_BINS: std::ops::Range<usize> = 0..5;
pub const MID_BINS: std::ops::Range<usize> = 5..21;
pub const TREBLE_START_BIN: usize = 21;
pub const BAND_COMPRESSION_EXP: f32 = 1.5;
pub const BASS_ALPHA: f32 = 0.12;
pub const MID_ALPHA: f32 = 0.10;
pub const TREBLE_ALPHA: f32 = 0.10;
pub const RMS_ALPHA: f32 = 0.08;
pub const ENERGY_RMS_THRESHOLD: f32 = 0.005; // raw rms above this counts as "playing"
pub const BEAT_BASS_CAP: f32 = 0.8;
pub const BEAT_BASS_GAIN: f32 = 0.6;
pub const BEAT_DECAY: f32 = 0.95; // per frame without energy
pub const MIC_ALPHA: f32 = 0.12;
pub const MIC_BEAT_GAIN: f32 = 0.4;
pub const MIC_NOISE_GAIN: f32 = 0.35;
pub const MIC_DEFAULT_SENSITIVITY: f32 = 0.5;
pub const MIC_MAX_SENSITIVITY: f32 = 2.0;
pub const WAVEFORM_MIDLINE: f32 = 128.0;

// Gesture estimator
pub const LANDMARK_COUNT: usize = 21;
pub const WRIST: usize = 0;
pub const FINGERTIPS: [usize; 5] = [4, 8, 12, 16, 20];
pub const OPENNESS_CLOSED: f32 = 0.20; // mean wrist->tip distance of a fist
pub const OPENNESS_OPEN: f32 = 0.40; // mean wrist->tip distance of an open hand
pub const CLOSED_SPREAD_THRESHOLD: f32 = 0.2;
pub const SCALE_BASE: f32 = 0.55;
pub const SCALE_DIST_OFFSET: f32 = 0.12;
pub const SCALE_DIST_GAIN: f32 = 2.1;
pub const ROT_Y_GAIN: f32 = 1.8;
pub const ROT_X_GAIN: f32 = -1.2;
pub const TWIST_GAIN: f32 = 0.45;
pub const SPREAD_RATE: f32 = 0.20;
pub const SCALE_RATE: f32 = 0.12;
pub const ROT_XY_RATE: f32 = 0.18;
pub const ROT_Z_RATE: f32 = 0.14;
pub const SPREAD_DECAY: f32 = 0.95;
pub const SCALE_RELAX: f32 = 0.05;
pub const ROT_XY_DECAY: f32 = 0.92;
pub const ROT_Z_DECAY: f32 = 0.90;

// Composer damping speeds (1/s)
pub const SPREAD_DAMP_SPEED: f32 = 14.0;
pub const SCALE_DAMP_SPEED: f32 = 10.0;
pub const ROT_XY_DAMP_SPEED: f32 = 8.0;
pub const ROT_Z_DAMP_SPEED: f32 = 7.0;
pub const IDLE_SPIN_RAD_PER_SEC: f32 = 0.08;
pub const GESTURE_SPREAD_BIAS: f32 = 0.22; // openness that maps to zero spread
pub const GESTURE_SPREAD_GAIN: f32 = 1.8;
pub const MID_SPREAD_GAIN: f32 = 0.8;
pub const SIZE_BASS_GAIN: f32 = 0.5;
pub const SIZE_PUMP_RATE: f32 = 0.2;
pub const NOISE_TREBLE_GAIN: f32 = 0.5;
pub const NOISE_PUMP_RATE: f32 = 0.15;
pub const RELAX_RATE: f32 = 0.1; // size/noise return to config when quiet
pub const MAX_FRAME_DT: f32 = 0.25;

// Shading
pub const SPREAD_DISPLACEMENT: f32 = 2.0;
pub const BEAT_PULSE: f32 = 0.3;
pub const NOISE_FREQ: f32 = 0.22;
pub const NOISE_TIME_SPEED: f32 = 0.65;
pub const NOISE_SEED_PHASE: f32 = 10.0;
pub const FLOAT_AMPLITUDE: f32 = 0.10;
pub const REPULSION_RADIUS: f32 = 1.25;
pub const REPULSION_STRENGTH: f32 = 0.85;
pub const POINT_SIZE_REFERENCE: f32 = 95.0;
pub const POINT_SIZE_MIN: f32 = 1.0;
pub const POINT_SIZE_MAX: f32 = 12.0;

#[inline]
pub fn pointer_offscreen_vec3() -> Vec3 {
    Vec3::from(POINTER_OFFSCREEN)
}
