// Point sampler: Halton sequences, per-shape generators and their bounds.

use aura_core::constants::*;
use aura_core::sampler::{generate, generate_with_rng, halton, saturn_ring_point, saturn_split};
use aura_core::{ConfigError, Shape};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn halton_matches_known_radical_inverses() {
    assert_eq!(halton(0, 2), 0.0);
    assert!((halton(1, 2) - 0.5).abs() < 1e-7);
    assert!((halton(2, 2) - 0.25).abs() < 1e-7);
    assert!((halton(3, 2) - 0.75).abs() < 1e-7);
    assert!((halton(1, 3) - 1.0 / 3.0).abs() < 1e-7);
    assert!((halton(4, 3) - (1.0 / 3.0 + 1.0 / 9.0)).abs() < 1e-7);
}

#[test]
fn halton_stays_in_unit_interval() {
    for base in [2, 3, 5, 7, 11] {
        for i in (0..20_000).step_by(7).chain([u32::MAX - 1, u32::MAX]) {
            let h = halton(i, base);
            assert!((0.0..1.0).contains(&h), "halton({i}, {base}) = {h}");
        }
    }
}

#[test]
fn every_shape_yields_requested_count_of_finite_points() {
    let mut rng = StdRng::seed_from_u64(7);
    for shape in Shape::ALL {
        for count in [1, 2, 3, 257, 4000] {
            let pts = generate_with_rng(shape, count, &mut rng).unwrap();
            assert_eq!(pts.len(), count, "{shape} x {count}");
            assert!(pts.iter().all(|p| p.is_finite()), "{shape} x {count} has non-finite points");
        }
    }
}

#[test]
fn zero_count_is_rejected() {
    for shape in Shape::ALL {
        assert_eq!(generate(shape, 0), Err(ConfigError::InvalidCount(0)));
    }
}

#[test]
fn deterministic_shapes_repeat_exactly() {
    for shape in Shape::ALL.into_iter().filter(|s| s.is_deterministic()) {
        let a = generate(shape, 1500).unwrap();
        let b = generate(shape, 1500).unwrap();
        assert_eq!(a, b, "{shape} changed between calls");
    }
}

#[test]
fn heart_repeats_with_the_same_seed() {
    let a = generate_with_rng(Shape::Heart, 800, &mut StdRng::seed_from_u64(99)).unwrap();
    let b = generate_with_rng(Shape::Heart, 800, &mut StdRng::seed_from_u64(99)).unwrap();
    let c = generate_with_rng(Shape::Heart, 800, &mut StdRng::seed_from_u64(100)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn sphere_points_sit_in_the_jittered_shell() {
    let pts = generate(Shape::Sphere, 5000).unwrap();
    let inner = SPHERE_RADIUS * SPHERE_JITTER_MIN - 1e-4;
    for p in &pts {
        let r = p.length();
        assert!(r >= inner && r <= SPHERE_RADIUS + 1e-4, "radius {r}");
    }
    // Coverage: the centroid of an even shell is near the origin.
    let centroid = pts.iter().copied().sum::<glam::Vec3>() / pts.len() as f32;
    assert!(centroid.length() < 0.1, "centroid {centroid:?}");
}

#[test]
fn heart_depth_is_bounded() {
    let pts = generate_with_rng(Shape::Heart, 3000, &mut StdRng::seed_from_u64(3)).unwrap();
    for p in &pts {
        assert!(p.z.abs() <= 4.0 + 1e-5);
        assert!(p.x.abs() <= 16.0 * HEART_SCALE + 1e-4);
    }
}

#[test]
fn flower_depth_stays_shallow() {
    let pts = generate(Shape::Flower, 3000).unwrap();
    assert!(pts.iter().all(|p| p.z.abs() <= 0.45 + 1e-5));
}

#[test]
fn saturn_split_follows_planet_ratio() {
    assert_eq!(saturn_split(100), (42, 58));
    assert_eq!(saturn_split(1), (0, 1));
    let (planet, ring) = saturn_split(8000);
    assert_eq!(planet + ring, 8000);
}

#[test]
fn saturn_has_planet_then_ring() {
    let count = 2000;
    let pts = generate(Shape::Saturn, count).unwrap();
    let (planet, _) = saturn_split(count);
    for p in &pts[..planet] {
        assert!(p.length() <= SATURN_PLANET_RADIUS + 1e-4);
    }
    for p in &pts[planet..] {
        let r = p.length();
        assert!(r >= SATURN_RING_INNER - 0.1, "ring point too close: {r}");
        assert!(r <= SATURN_RING_INNER + SATURN_RING_WIDTH + 0.1, "ring point too far: {r}");
    }
}

#[test]
fn untilted_ring_is_thin() {
    for i in 0..1000 {
        let p = saturn_ring_point(i);
        assert!(p.y.abs() <= 0.07 + 1e-6);
        let planar = glam::Vec2::new(p.x, p.z).length();
        assert!(planar >= SATURN_RING_INNER - 1e-4);
        assert!(planar < SATURN_RING_INNER + SATURN_RING_WIDTH);
    }
}

#[test]
fn fireworks_stay_inside_outer_shell() {
    let pts = generate(Shape::Fireworks, 4000).unwrap();
    let outer = FIREWORKS_SHELL + FIREWORKS_SHELL_JITTER;
    assert!(pts.iter().all(|p| p.length() <= outer + 1e-4));
    // Trails reach well inside the shell.
    assert!(pts.iter().any(|p| p.length() < FIREWORKS_SHELL * 0.5));
}

#[test]
fn shape_names_parse_back() {
    for shape in Shape::ALL {
        assert_eq!(shape.name().parse::<Shape>(), Ok(shape));
        assert_eq!(shape.name().to_uppercase().parse::<Shape>(), Ok(shape));
    }
    assert_eq!(" Saturn ".parse::<Shape>(), Ok(Shape::Saturn));
    assert!(matches!("cube".parse::<Shape>(), Err(ConfigError::UnknownShape(_))));
}
