//! `#[repr(C)]` layouts shared with `shaders/particles.wgsl`.
//!
//! Field order and padding must match the WGSL structs exactly.

use crate::compose::RenderUniforms;
use crate::state::Camera;

/// Per-particle vertex attributes (instance step mode).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub current: [f32; 3],
    pub size: f32,
    pub target: [f32; 3],
    pub seed: f32,
}

/// Uniform block for one frame.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuUniforms {
    pub model_view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    /// rgb, time
    pub color_time: [f32; 4],
    /// mouse xyz, size
    pub mouse_size: [f32; 4],
    /// gesture scale, gesture spread, noise strength, beat signal
    pub gesture: [f32; 4],
    /// morph factor, viewport width, viewport height, unused
    pub morph_viewport: [f32; 4],
}

impl GpuUniforms {
    pub fn pack(uniforms: &RenderUniforms, camera: &Camera, viewport: [f32; 2]) -> Self {
        let model_view = camera.view_matrix() * uniforms.model_matrix();
        Self {
            model_view: model_view.to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            color_time: [
                uniforms.color.x,
                uniforms.color.y,
                uniforms.color.z,
                uniforms.time,
            ],
            mouse_size: [
                uniforms.mouse.x,
                uniforms.mouse.y,
                uniforms.mouse.z,
                uniforms.size,
            ],
            gesture: [
                uniforms.gesture_scale,
                uniforms.gesture_spread,
                uniforms.noise_strength,
                uniforms.beat_signal,
            ],
            morph_viewport: [uniforms.morph_factor, viewport[0], viewport[1], 0.0],
        }
    }
}
