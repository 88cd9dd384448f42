//! Procedural point clouds for each [`Shape`].
//!
//! Everything except the heart is built from Fibonacci lattices and Halton
//! sequences, so the same `(shape, count)` always yields the same points and
//! the coverage stays even without visible clumping.

use crate::config::Shape;
use crate::constants::*;
use crate::error::ConfigError;
use glam::{Quat, Vec3};
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Largest `f32` strictly below 1.0.
const BELOW_ONE: f32 = 0.999_999_94;

/// Radical inverse of `index` in `base` (one Halton coordinate).
///
/// Returns a value in `[0, 1)`; `halton(0, b)` is 0.
pub fn halton(index: u32, base: u32) -> f32 {
    let base = base.max(2);
    let inv_base = 1.0 / base as f64;
    let mut f = 1.0_f64;
    let mut r = 0.0_f64;
    let mut i = index;
    while i > 0 {
        f *= inv_base;
        r += f * (i % base) as f64;
        i /= base;
    }
    (r as f32).min(BELOW_ONE)
}

/// Golden-angle increment of the Fibonacci lattice.
#[inline]
fn golden_angle() -> f32 {
    PI * (3.0 - 5.0_f32.sqrt())
}

/// Unit-sphere direction of lattice point `i` out of `count`.
#[inline]
fn fibonacci_direction(i: usize, count: usize) -> Vec3 {
    let denom = count.saturating_sub(1).max(1) as f32;
    let y = 1.0 - (i as f32 / denom) * 2.0;
    let r = (1.0 - y * y).max(0.0).sqrt();
    let theta = golden_angle() * i as f32;
    Vec3::new(theta.cos() * r, y, theta.sin() * r)
}

#[inline]
fn sphere_jitter(i: usize) -> f32 {
    SPHERE_JITTER_MIN + (1.0 - SPHERE_JITTER_MIN) * halton(i as u32 + 1, 3)
}

/// Split of a saturn cloud into `(planet, ring)` point counts.
pub fn saturn_split(count: usize) -> (usize, usize) {
    let planet = (count as f32 * SATURN_PLANET_RATIO).floor() as usize;
    (planet, count - planet.min(count))
}

/// Generate `count` points for `shape`, using the thread RNG for the heart.
pub fn generate(shape: Shape, count: usize) -> Result<Vec<Vec3>, ConfigError> {
    generate_with_rng(shape, count, &mut rand::thread_rng())
}

/// Generate `count` points for `shape`; `rng` is only consumed by the heart.
pub fn generate_with_rng<R: Rng + ?Sized>(
    shape: Shape,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Vec3>, ConfigError> {
    if count == 0 {
        return Err(ConfigError::InvalidCount(count));
    }
    let points = match shape {
        Shape::Sphere => sphere(count),
        Shape::Heart => heart(count, rng),
        Shape::Flower => flower(count),
        Shape::Saturn => saturn(count),
        Shape::Fireworks => fireworks(count),
    };
    debug_assert_eq!(points.len(), count);
    Ok(points)
}

fn sphere(count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|i| fibonacci_direction(i, count) * (SPHERE_RADIUS * sphere_jitter(i)))
        .collect()
}

fn heart<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let t: f32 = rng.gen::<f32>() * TAU;
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
            // Thickest through the middle, flat at the cusp (t = pi).
            let thickness = 2.0 * (1.0 - (t - PI).abs() / PI);
            let z = (rng.gen::<f32>() - 0.5) * thickness * 4.0;
            Vec3::new(x * HEART_SCALE, y * HEART_SCALE, z)
        })
        .collect()
}

fn flower(count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let n = i as u32 + 1;
            let u = halton(n, 2) * TAU;
            let v = halton(n, 3) * PI;
            let r = 2.0 + (FLOWER_PETALS * u).cos() + v.sin();
            let jx = (halton(n, 5) - 0.5) * 0.38;
            let jy = (halton(n, 7) - 0.5) * 0.38;
            let z = (halton(n, 11) - 0.5) * 0.9;
            Vec3::new(r * v.sin() * u.cos() + jx, r * v.sin() * u.sin() + jy, z)
        })
        .collect()
}

fn saturn(count: usize) -> Vec<Vec3> {
    let (planet, ring) = saturn_split(count);
    let tilt = Quat::from_rotation_x(SATURN_RING_TILT);
    let mut points = Vec::with_capacity(count);
    points.extend(
        (0..planet).map(|i| fibonacci_direction(i, planet) * (SATURN_PLANET_RADIUS * sphere_jitter(i))),
    );
    points.extend((0..ring).map(|i| tilt * saturn_ring_point(i)));
    points
}

/// Ring point `i` in the ring's own plane, before the tilt.
pub fn saturn_ring_point(i: usize) -> Vec3 {
    let n = i as u32 + 1;
    let angle = halton(n, 2) * TAU;
    let dist = SATURN_RING_INNER + SATURN_RING_WIDTH * halton(n, 5);
    let y = (halton(n, 3) - 0.5) * 0.14;
    Vec3::new(dist * angle.cos(), y, dist * angle.sin())
}

fn fireworks(count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let n = i as u32 + 1;
            let shell = FIREWORKS_SHELL + FIREWORKS_SHELL_JITTER * halton(n, 3);
            let trail = FIREWORKS_TRAIL_MIN + (1.0 - FIREWORKS_TRAIL_MIN) * halton(n, 5);
            fibonacci_direction(i, count) * (shell * trail)
        })
        .collect()
}
