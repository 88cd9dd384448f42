//! 3D simplex noise (Ashima Arts / Stefan Gustavson lattice and gradients).
//!
//! The corner contributions are summed without the radial `m^4` window and
//! scaled by 10, which gives a coarser, larger drift than textbook simplex
//! noise (roughly ±30 instead of ±1, stepping at cell edges). This is the
//! same arithmetic as `snoise` in `shaders/particles.wgsl`, so the CPU
//! shading reference and the GPU agree to within float rounding.

use glam::{Vec3, Vec3Swizzles, Vec4, Vec4Swizzles};

/// Upper bound on `|snoise(v)|`: four corner offsets of at most ~0.87
/// against gradients no longer than ~1.1, times 10, rounded up.
pub const SNOISE_BOUND: f32 = 40.0;

#[inline]
fn mod289_3(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn mod289_4(x: Vec4) -> Vec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn permute(x: Vec4) -> Vec4 {
    mod289_4((x * 34.0 + Vec4::ONE) * x)
}

#[inline]
fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.792_842_9) - r * 0.853_734_73
}

/// GLSL `step(edge, x)`: 0 where `x < edge`, else 1.
#[inline]
fn step3(edge: Vec3, x: Vec3) -> Vec3 {
    Vec3::select(x.cmplt(edge), Vec3::ZERO, Vec3::ONE)
}

#[inline]
fn step4(edge: Vec4, x: Vec4) -> Vec4 {
    Vec4::select(x.cmplt(edge), Vec4::ZERO, Vec4::ONE)
}

/// Unwindowed simplex noise; bounded by [`SNOISE_BOUND`], piecewise linear
/// inside each simplex cell.
pub fn snoise(v: Vec3) -> f32 {
    const CX: f32 = 1.0 / 6.0;
    const CY: f32 = 1.0 / 3.0;

    // First corner
    let i = (v + Vec3::splat(v.dot(Vec3::splat(CY)))).floor();
    let x0 = v - i + Vec3::splat(i.dot(Vec3::splat(CX)));

    // Other corners
    let g = step3(x0.yzx(), x0);
    let l = Vec3::ONE - g;
    let i1 = g.min(l.zxy());
    let i2 = g.max(l.zxy());

    let x1 = x0 - i1 + Vec3::splat(CX);
    let x2 = x0 - i2 + Vec3::splat(CY);
    let x3 = x0 - Vec3::splat(0.5);

    // Permutations
    let i = mod289_3(i);
    let p = permute(
        permute(
            permute(Vec4::splat(i.z) + Vec4::new(0.0, i1.z, i2.z, 1.0))
                + Vec4::splat(i.y)
                + Vec4::new(0.0, i1.y, i2.y, 1.0),
        ) + Vec4::splat(i.x)
            + Vec4::new(0.0, i1.x, i2.x, 1.0),
    );

    // Gradients: 7x7 points over a square, mapped onto an octahedron.
    let n = 1.0 / 7.0;
    let ns = Vec3::new(2.0 * n, 0.5 * n - 1.0, n);

    let j = p - ((p * ns.z * ns.z).floor() * 49.0);
    let x_ = (j * ns.z).floor();
    let y_ = (j - x_ * 7.0).floor();

    let x = x_ * ns.x + Vec4::splat(ns.y);
    let y = y_ * ns.x + Vec4::splat(ns.y);
    let h = Vec4::ONE - x.abs() - y.abs();

    let b0 = Vec4::new(x.x, x.y, y.x, y.y);
    let b1 = Vec4::new(x.z, x.w, y.z, y.w);

    let s0 = b0.floor() * 2.0 + Vec4::ONE;
    let s1 = b1.floor() * 2.0 + Vec4::ONE;
    let sh = -step4(h, Vec4::ZERO);

    let a0 = b0.xzyw() + s0.xzyw() * sh.xxyy();
    let a1 = b1.xzyw() + s1.xzyw() * sh.zzww();

    let mut p0 = Vec3::new(a0.x, a0.y, h.x);
    let mut p1 = Vec3::new(a0.z, a0.w, h.y);
    let mut p2 = Vec3::new(a1.x, a1.y, h.z);
    let mut p3 = Vec3::new(a1.z, a1.w, h.w);

    // Normalise gradients
    let norm = taylor_inv_sqrt(Vec4::new(p0.dot(p0), p1.dot(p1), p2.dot(p2), p3.dot(p3)));
    p0 *= norm.x;
    p1 *= norm.y;
    p2 *= norm.z;
    p3 *= norm.w;

    10.0 * (p0.dot(x0) + p1.dot(x1) + p2.dot(x2) + p3.dot(x3))
}
