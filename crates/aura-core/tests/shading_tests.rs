// CPU shading reference: displacement, point size, fragment falloff and the
// simplex noise it is built on.

use aura_core::constants::*;
use aura_core::noise::{snoise, SNOISE_BOUND};
use aura_core::shading::{displace, point_size, shade_fragment, shade_vertex, smoothstep, VertexAttributes};
use aura_core::{Camera, Configuration, GpuUniforms, RenderUniforms, PARTICLES_WGSL};
use glam::{Vec2, Vec3};

/// Uniforms that leave positions untouched: no spread, beat, noise or pointer.
fn still() -> RenderUniforms {
    RenderUniforms {
        noise_strength: 0.0,
        ..RenderUniforms::defaults(&Configuration::default())
    }
}

fn at(p: Vec3) -> VertexAttributes {
    VertexAttributes {
        current: p,
        target: p,
        size: 1.0,
        seed: 0.25,
    }
}

#[test]
fn smoothstep_rises_and_falls() {
    assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
    assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    // Reversed edges give the falling curve.
    assert_eq!(smoothstep(1.0, 0.0, 0.0), 1.0);
    assert_eq!(smoothstep(1.0, 0.0, 1.0), 0.0);
    assert!((smoothstep(1.0, 0.0, 0.25) - (1.0 - smoothstep(0.0, 1.0, 0.25))).abs() < 1e-6);
    // Degenerate span is a step.
    assert_eq!(smoothstep(0.5, 0.5, 0.4), 0.0);
    assert_eq!(smoothstep(0.5, 0.5, 0.6), 1.0);
}

#[test]
fn still_uniforms_leave_positions_alone() {
    let p = Vec3::new(1.0, -2.0, 0.5);
    let (pos, distance, _) = displace(&at(p), &still());
    assert!(pos.distance(p) < 1e-6);
    assert!((distance - p.length()).abs() < 1e-6);
}

#[test]
fn morph_factor_blends_current_and_target() {
    let attrs = VertexAttributes {
        current: Vec3::new(0.0, 0.0, 2.0),
        target: Vec3::new(0.0, 0.0, 4.0),
        size: 1.0,
        seed: 0.0,
    };
    let u = RenderUniforms {
        morph_factor: 0.25,
        ..still()
    };
    let (pos, distance, _) = displace(&attrs, &u);
    assert!(pos.distance(Vec3::new(0.0, 0.0, 2.5)) < 1e-6);
    assert!((distance - 2.5).abs() < 1e-6);
}

#[test]
fn spread_pushes_outward_and_scale_multiplies() {
    let u = RenderUniforms {
        gesture_spread: 1.0,
        gesture_scale: 0.5,
        ..still()
    };
    let (pos, distance, _) = displace(&at(Vec3::new(0.0, 0.0, 2.0)), &u);
    assert!(pos.distance(Vec3::new(0.0, 0.0, 2.0)) < 1e-5, "(2 + 2) * 0.5");
    assert!((distance - 2.0).abs() < 1e-6, "distance is taken before displacement");

    // A particle at the center is pushed along +Y.
    let u = RenderUniforms {
        gesture_spread: 1.0,
        ..still()
    };
    let (pos, _, _) = displace(&at(Vec3::ZERO), &u);
    assert!(pos.distance(Vec3::new(0.0, SPREAD_DISPLACEMENT, 0.0)) < 1e-6);
}

#[test]
fn beat_pulses_the_cloud() {
    let u = RenderUniforms {
        beat_signal: 1.0,
        ..still()
    };
    let p = Vec3::new(3.0, 0.0, 0.0);
    let (pos, _, _) = displace(&at(p), &u);
    assert!(pos.distance(p * (1.0 + BEAT_PULSE)) < 1e-5);
}

#[test]
fn noise_drift_is_bounded_and_tangential() {
    let u = RenderUniforms {
        noise_strength: 1.0,
        time: 3.7,
        ..still()
    };
    for i in 0..200 {
        let p = Vec3::new((i as f32 * 0.37).sin(), (i as f32 * 0.11).cos(), i as f32 * 0.01) * 3.0;
        if p.length() < 0.01 {
            continue;
        }
        let (pos, _, _) = displace(&at(p), &u);
        let offset = pos - p;
        // Drift is at most amp * |n| * sqrt(1 + 0.49).
        assert!(offset.length() <= FLOAT_AMPLITUDE * SNOISE_BOUND * 1.3, "offset {offset:?}");
        assert!(offset.dot(p.normalize()).abs() < 1e-3, "drift left the surface");
    }
}

#[test]
fn pointer_repels_nearby_particles_only() {
    let p = Vec3::new(1.0, 0.0, 0.0);
    let near = RenderUniforms {
        mouse: Vec3::new(0.5, 0.0, 0.0),
        ..still()
    };
    let (pos, _, _) = displace(&at(p), &near);
    assert!(pos.x > p.x, "pushed away from the pointer");
    assert!(pos.x - p.x <= REPULSION_STRENGTH + 1e-6);

    let far = RenderUniforms {
        mouse: Vec3::new(-3.0, 0.0, 0.0),
        ..still()
    };
    let (pos, _, _) = displace(&at(p), &far);
    assert!(pos.distance(p) < 1e-6);
}

#[test]
fn point_size_scales_with_depth_and_clamps() {
    assert!((point_size(0.5, 1.0, 9.5) - 5.0).abs() < 1e-5);
    assert_eq!(point_size(2.0, 1.0, 9.0), POINT_SIZE_MAX);
    assert_eq!(point_size(0.01, 1.0, 9.0), POINT_SIZE_MIN);
    assert_eq!(point_size(1.0, 1.0, 0.0), POINT_SIZE_MAX);
    assert_eq!(point_size(1.0, 1.0, -4.0), POINT_SIZE_MIN);
    assert_eq!(point_size(f32::NAN, 1.0, 9.0), POINT_SIZE_MIN);
    assert!(point_size(0.5, 1.0, 6.0) > point_size(0.5, 1.0, 12.0));
}

#[test]
fn vertex_at_origin_sits_camera_distance_away() {
    let camera = Camera::default();
    let u = still();
    let v = shade_vertex(&at(Vec3::ZERO), &u, camera.view_matrix(), camera.projection_matrix());
    assert!((v.view_depth - CAMERA_Z).abs() < 1e-4);
    let ndc = v.clip_position.truncate() / v.clip_position.w;
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    assert!((0.0..=1.0).contains(&ndc.z));
    assert_eq!(v.color, u.color);
    assert!(v.alpha_boost >= 0.75 - 1e-3 && v.alpha_boost <= 1.0 + 1e-3);
}

#[test]
fn fragment_discards_outside_the_disc() {
    let camera = Camera::default();
    let v = shade_vertex(&at(Vec3::new(2.0, 0.0, 0.0)), &still(), camera.view_matrix(), camera.projection_matrix());
    assert!(shade_fragment(Vec2::new(0.0, 0.0), &v).is_none());
    assert!(shade_fragment(Vec2::new(1.0, 0.5), &v).is_some());
    assert!(shade_fragment(Vec2::new(1.01, 0.5), &v).is_none());
    assert!(shade_fragment(Vec2::splat(f32::NAN), &v).is_none());
}

#[test]
fn fragment_alpha_falls_off_from_the_center() {
    let camera = Camera::default();
    let v = shade_vertex(&at(Vec3::new(2.0, 0.0, 0.0)), &still(), camera.view_matrix(), camera.projection_matrix());
    let mut last = f32::INFINITY;
    for i in 0..=10 {
        let r = i as f32 * 0.05;
        let rgba = shade_fragment(Vec2::new(0.5 + r, 0.5), &v).unwrap();
        assert!((0.0..=1.0).contains(&rgba.w));
        assert!(rgba.w <= last + 1e-6);
        last = rgba.w;
        assert_eq!(rgba.truncate(), v.color);
    }
    assert!(shade_fragment(Vec2::splat(0.5), &v).unwrap().w > 0.5);
}

#[test]
fn distant_particles_fade_out() {
    let camera = Camera::default();
    let mv = camera.view_matrix();
    let proj = camera.projection_matrix();
    let outer = shade_vertex(&at(Vec3::new(7.5, 0.0, 0.0)), &still(), mv, proj);
    assert_eq!(shade_fragment(Vec2::splat(0.5), &outer).unwrap().w, 0.0);
    let behind = shade_vertex(&at(Vec3::new(0.0, 0.0, -20.0)), &still(), mv, proj);
    assert_eq!(shade_fragment(Vec2::splat(0.5), &behind).unwrap().w, 0.0);
}

#[test]
fn simplex_noise_is_bounded_and_piecewise_linear() {
    let mut small_steps = 0;
    for i in 0..2000 {
        let p = Vec3::new(i as f32 * 0.173, (i as f32 * 0.071).sin() * 9.0, i as f32 * -0.029);
        let n = snoise(p);
        assert!(n.is_finite() && n.abs() <= SNOISE_BOUND, "snoise({p:?}) = {n}");
        assert_eq!(snoise(p), n);
        // Inside a cell the gradients are fixed, so a tiny step moves it a little.
        let step = snoise(p + Vec3::splat(1e-3));
        if (step - n).abs() < 0.1 {
            small_steps += 1;
        }
    }
    assert!(small_steps > 1900, "only {small_steps} smooth steps");
}

#[test]
fn simplex_noise_is_larger_than_unit_range() {
    let peak = (0..4000)
        .map(|i| snoise(Vec3::new(i as f32 * 0.113, i as f32 * 0.057, (i as f32 * 0.013).cos() * 5.0)).abs())
        .fold(0.0_f32, f32::max);
    assert!(peak > 2.0 && peak <= SNOISE_BOUND, "peak {peak}");
}

#[test]
fn simplex_noise_varies() {
    let values: Vec<f32> = (0..64).map(|i| snoise(Vec3::new(i as f32 * 0.5, 0.3, 0.7))).collect();
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    assert!(max - min > 0.5);
}

#[test]
fn gpu_uniforms_pack_matches_camera_and_state() {
    let camera = Camera::with_aspect(1280, 720);
    let u = RenderUniforms {
        time: 2.5,
        morph_factor: 0.4,
        beat_signal: 0.3,
        rotation: Vec3::new(0.0, 0.5, 0.0),
        ..still()
    };
    let g = GpuUniforms::pack(&u, &camera, [1280.0, 720.0]);
    assert_eq!(g.proj, camera.projection_matrix().to_cols_array_2d());
    assert_eq!(g.model_view, (camera.view_matrix() * u.model_matrix()).to_cols_array_2d());
    assert_eq!(g.color_time[3], 2.5);
    assert_eq!(g.gesture[3], 0.3);
    assert_eq!(g.morph_viewport, [0.4, 1280.0, 720.0, 0.0]);
}

#[test]
fn shader_source_declares_both_stages() {
    assert!(PARTICLES_WGSL.contains("fn vs_main"));
    assert!(PARTICLES_WGSL.contains("fn fs_main"));
    assert!(PARTICLES_WGSL.contains("@group(0) @binding(0)"));
}
