pub mod audio;
pub mod cloud;
pub mod compose;
pub mod config;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod gpu;
pub mod morph;
pub mod noise;
pub mod sampler;
pub mod session;
pub mod shading;
pub mod state;
pub mod tween;

pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");

pub use audio::{AudioBandEstimator, AudioBandState};
pub use compose::{Composer, FrameSignals, RenderUniforms};
pub use config::{ConfigChanges, Configuration, Rgb, Shape};
pub use error::{ConfigError, DeviceError, DeviceKind};
pub use gesture::{GestureEstimator, GestureState, GestureTracker, HandLandmarks, LandmarkDetector, LandmarkInput};
pub use gpu::{GpuUniforms, ParticleInstance};
pub use morph::{MorphEngine, MorphState};
pub use session::{FrameClock, FrameInput, InputFallback, Session};
pub use state::Camera;
