//! CPU reference of the particle shader.
//!
//! `shade_vertex` and `shade_fragment` are pure functions of the particle
//! attributes and the frame uniforms and mirror `shaders/particles.wgsl`
//! step for step. They are used to test the shading math without a GPU.

use crate::compose::RenderUniforms;
use crate::constants::*;
use crate::gpu::ParticleInstance;
use crate::noise::snoise;
use glam::{Mat4, Vec2, Vec3, Vec3Swizzles, Vec4};

/// Attributes of one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexAttributes {
    pub current: Vec3,
    pub target: Vec3,
    pub size: f32,
    pub seed: f32,
}

impl From<&ParticleInstance> for VertexAttributes {
    fn from(p: &ParticleInstance) -> Self {
        Self {
            current: Vec3::from(p.current),
            target: Vec3::from(p.target),
            size: p.size,
            seed: p.seed,
        }
    }
}

/// Vertex stage output (clip position + varyings).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexOutput {
    pub clip_position: Vec4,
    /// Object-space position after every displacement.
    pub position: Vec3,
    pub point_size: f32,
    pub color: Vec3,
    /// Distance from the origin of the morphed (undisplaced) position.
    pub distance: f32,
    pub alpha_boost: f32,
    pub view_depth: f32,
}

/// GLSL-style smoothstep; `edge0 > edge1` gives the falling curve.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let span = edge1 - edge0;
    if span == 0.0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / span).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Direction of `pos` from the origin, +Y for points at the center.
#[inline]
fn radial_direction(pos: Vec3) -> Vec3 {
    if pos.length() < 0.001 {
        Vec3::Y
    } else {
        pos.normalize()
    }
}

/// A unit vector perpendicular to `direction`, +X when `direction` is vertical.
#[inline]
fn tangent_of(direction: Vec3) -> Vec3 {
    let t = direction.cross(Vec3::Y);
    if t.length() < 0.01 {
        Vec3::X
    } else {
        t.normalize()
    }
}

/// Object-space displacement of one particle: morph, gesture, beat, noise
/// drift and pointer repulsion. Returns `(position, morphed distance, n.z)`.
pub fn displace(attrs: &VertexAttributes, u: &RenderUniforms) -> (Vec3, f32, f32) {
    let mut pos = attrs.current.lerp(attrs.target, u.morph_factor);
    let distance = pos.length();

    let direction = radial_direction(pos);
    pos += direction * (u.gesture_spread * SPREAD_DISPLACEMENT);
    pos *= u.gesture_scale;

    pos *= 1.0 + u.beat_signal * BEAT_PULSE;

    // Drift along the surface, not away from it.
    let t = u.time * NOISE_TIME_SPEED + attrs.seed * NOISE_SEED_PHASE;
    let n = Vec3::new(
        snoise(pos * NOISE_FREQ + Vec3::splat(t)),
        snoise(pos.yzx() * NOISE_FREQ + Vec3::splat(t * 1.11)),
        snoise(pos.zxy() * NOISE_FREQ - Vec3::splat(t * 0.97)),
    );
    let tangent = tangent_of(direction);
    let bitangent = direction.cross(tangent).normalize_or_zero();
    let amp = FLOAT_AMPLITUDE * u.noise_strength;
    pos += tangent * n.x * amp;
    pos += bitangent * n.y * (amp * 0.7);

    let to_pointer = pos - u.mouse;
    let m = smoothstep(REPULSION_RADIUS, 0.0, to_pointer.length());
    if m > 0.0 {
        pos += to_pointer.normalize_or_zero() * m * REPULSION_STRENGTH;
    }

    (pos, distance, n.z)
}

/// Point size in pixels for a particle at `view_depth`, clamped to [1, 12].
#[inline]
pub fn point_size(size: f32, particle_size: f32, view_depth: f32) -> f32 {
    let px = size * particle_size * (POINT_SIZE_REFERENCE / view_depth);
    if px.is_nan() {
        POINT_SIZE_MIN
    } else {
        px.clamp(POINT_SIZE_MIN, POINT_SIZE_MAX)
    }
}

pub fn shade_vertex(attrs: &VertexAttributes, u: &RenderUniforms, model_view: Mat4, proj: Mat4) -> VertexOutput {
    let (pos, distance, nz) = displace(attrs, u);
    let mv = model_view * pos.extend(1.0);
    let view_depth = -mv.z;
    VertexOutput {
        clip_position: proj * mv,
        position: pos,
        point_size: point_size(u.size, attrs.size, view_depth),
        color: u.color,
        distance,
        alpha_boost: 0.75 + 0.25 * (0.5 + 0.5 * nz),
        view_depth,
    }
}

/// Fragment stage for `point_coord` in [0, 1]^2 across the sprite.
///
/// Returns `None` for discarded fragments, otherwise straight RGBA meant for
/// additive blending.
pub fn shade_fragment(point_coord: Vec2, v: &VertexOutput) -> Option<Vec4> {
    let r = point_coord.distance(Vec2::splat(0.5));
    if r > 0.5 || r.is_nan() {
        return None;
    }
    let core = smoothstep(0.28, 0.0, r);
    let halo = smoothstep(0.50, 0.15, r);
    let radius_fade = smoothstep(7.0, 1.5, v.distance);
    let view_fade = smoothstep(24.0, 8.0, v.view_depth);
    let alpha = (core * 0.82 + halo * 0.22) * radius_fade * view_fade * v.alpha_boost;
    let alpha = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 0.0 };
    Some(v.color.extend(alpha))
}
