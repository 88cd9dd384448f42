// Gesture estimator: openness, two-hand scale and rotation, decay, and the
// frame-gated tracker.

use aura_core::constants::*;
use aura_core::gesture::FrameGate;
use aura_core::{GestureEstimator, GestureTracker, HandLandmarks, LandmarkDetector, LandmarkInput};
use glam::Vec3;
use smallvec::{smallvec, SmallVec};

/// A hand with the wrist at `(x, y)` and every fingertip `reach` to its right.
fn hand(x: f32, y: f32, reach: f32) -> HandLandmarks {
    let wrist = Vec3::new(x, y, 0.0);
    let mut points = [wrist; LANDMARK_COUNT];
    for tip in FINGERTIPS {
        points[tip] = wrist + Vec3::new(reach, 0.0, 0.0);
    }
    HandLandmarks::new(points)
}

fn tracking() -> GestureEstimator {
    let mut g = GestureEstimator::new();
    g.start();
    g
}

#[test]
fn openness_maps_fist_to_zero_and_open_hand_to_one() {
    assert_eq!(hand(0.5, 0.5, 0.1).openness(), 0.0);
    assert_eq!(hand(0.5, 0.5, 0.6).openness(), 1.0);
    assert!((hand(0.5, 0.5, 0.3).openness() - 0.5).abs() < 1e-5);
}

#[test]
fn openness_ignores_depth_and_non_finite_input() {
    let mut h = hand(0.5, 0.5, 0.3);
    h.points[8].z = 5.0;
    assert!((h.openness() - 0.5).abs() < 1e-5);
    h.points[4] = Vec3::splat(f32::NAN);
    assert_eq!(h.openness(), 0.0);
}

#[test]
fn neutral_state_before_any_hands() {
    let g = GestureEstimator::new();
    let s = g.state();
    assert!(!s.has_hands);
    assert_eq!(s.spread, 0.0);
    assert_eq!(s.scale, 1.0);
    assert_eq!(s.rotation, Vec3::ZERO);
    assert!(s.is_closed);
    assert!(!g.is_active());
}

#[test]
fn two_hands_drive_spread_scale_and_rotation() {
    let mut g = tracking();
    let hands = [hand(0.3, 0.5, 0.6), hand(0.7, 0.5, 0.6)];
    let s = g.update(LandmarkInput::Detected(&hands)).clone();
    assert!(s.has_hands);
    assert_eq!(s.hands.len(), 2);
    assert!((s.spread - SPREAD_RATE).abs() < 1e-6);
    let target_scale = SCALE_BASE + (0.4 - SCALE_DIST_OFFSET) * SCALE_DIST_GAIN;
    assert!((s.scale - (1.0 + (target_scale - 1.0) * SCALE_RATE)).abs() < 1e-5);
    assert!(s.rotation.length() < 1e-6, "centered level hands do not rotate");

    for _ in 0..200 {
        g.update(LandmarkInput::Detected(&hands));
    }
    let s = g.state();
    assert!((s.spread - 1.0).abs() < 1e-4);
    assert!((s.scale - target_scale).abs() < 1e-4);
    assert!(!s.is_closed);
}

#[test]
fn hand_positions_tilt_and_twist() {
    let mut g = tracking();
    // Both hands up-right of center, right hand higher in the image (smaller y).
    let hands = [hand(0.6, 0.4, 0.3), hand(0.9, 0.3, 0.3)];
    for _ in 0..300 {
        g.update(LandmarkInput::Detected(&hands));
    }
    let r = g.state().rotation;
    let mid = glam::Vec2::new(0.75, 0.35);
    assert!((r.y - (mid.x - 0.5) * ROT_Y_GAIN).abs() < 1e-4);
    assert!((r.x - (mid.y - 0.5) * ROT_X_GAIN).abs() < 1e-4);
    assert!((r.z - (-0.1f32).atan2(0.3) * TWIST_GAIN).abs() < 1e-4);
}

#[test]
fn one_hand_only_tilts() {
    let mut g = tracking();
    let s = g.update(LandmarkInput::Detected(&[hand(0.8, 0.5, 0.5)])).clone();
    assert_eq!(s.scale, 1.0);
    assert_eq!(s.rotation.z, 0.0);
    assert!((s.rotation.y - 0.3 * ROT_Y_GAIN * ROT_XY_RATE).abs() < 1e-6);
    assert_eq!(s.hands.len(), 1);
}

#[test]
fn extra_hands_are_ignored() {
    let mut g = tracking();
    let hands = [hand(0.3, 0.5, 0.6), hand(0.7, 0.5, 0.6), hand(0.1, 0.1, 0.1)];
    let s = g.update(LandmarkInput::Detected(&hands));
    assert_eq!(s.hands.len(), 2);
    assert!((s.spread - SPREAD_RATE).abs() < 1e-6);
}

#[test]
fn unchanged_frame_holds_state_while_tracking() {
    let mut g = tracking();
    let hands = [hand(0.3, 0.5, 0.6), hand(0.7, 0.5, 0.6)];
    g.update(LandmarkInput::Detected(&hands));
    let held = g.state().clone();
    for _ in 0..10 {
        g.update(LandmarkInput::Unchanged);
    }
    assert_eq!(g.state(), &held);
}

#[test]
fn empty_frame_decays_toward_neutral() {
    let mut g = tracking();
    let hands = [hand(0.2, 0.2, 0.6), hand(0.9, 0.6, 0.6)];
    for _ in 0..100 {
        g.update(LandmarkInput::Detected(&hands));
    }
    let before = g.state().clone();
    let s = g.update(LandmarkInput::Detected(&[])).clone();
    assert!(!s.has_hands);
    assert!(s.hands.is_empty());
    assert!((s.spread - before.spread * SPREAD_DECAY).abs() < 1e-6);
    assert!((s.rotation.x - before.rotation.x * ROT_XY_DECAY).abs() < 1e-6);
    assert!((s.rotation.z - before.rotation.z * ROT_Z_DECAY).abs() < 1e-6);
    assert!((s.scale - (before.scale + (1.0 - before.scale) * SCALE_RELAX)).abs() < 1e-6);

    for _ in 0..400 {
        g.update(LandmarkInput::Detected(&[]));
    }
    let s = g.state();
    assert!(s.spread < 1e-4);
    assert!((s.scale - 1.0).abs() < 1e-4);
    assert!(s.rotation.length() < 1e-4);
    assert!(s.is_closed);
}

#[test]
fn inactive_estimator_decays_every_tick() {
    let mut g = tracking();
    let hands = [hand(0.3, 0.5, 0.6), hand(0.7, 0.5, 0.6)];
    for _ in 0..50 {
        g.update(LandmarkInput::Detected(&hands));
    }
    g.stop();
    assert!(!g.state().has_hands);
    let spread = g.state().spread;
    g.update(LandmarkInput::Detected(&hands));
    assert!(!g.state().has_hands, "stopped tracking ignores detections");
    g.update(LandmarkInput::Unchanged);
    assert!((g.state().spread - spread * SPREAD_DECAY * SPREAD_DECAY).abs() < 1e-6);
}

#[test]
fn frame_gate_accepts_each_timestamp_once() {
    let mut gate = FrameGate::default();
    assert!(gate.accept(33.0));
    assert!(!gate.accept(33.0));
    assert!(gate.accept(66.0));
    gate.reset();
    assert!(gate.accept(66.0));
}

struct CountingDetector {
    calls: usize,
    hands: SmallVec<[HandLandmarks; 2]>,
}

impl LandmarkDetector for CountingDetector {
    type Frame = [u8];

    fn detect(&mut self, _frame: &[u8], _timestamp_ms: f64) -> SmallVec<[HandLandmarks; 2]> {
        self.calls += 1;
        self.hands.clone()
    }
}

#[test]
fn tracker_runs_inference_once_per_video_frame() {
    let mut tracker = GestureTracker::new(CountingDetector {
        calls: 0,
        hands: smallvec![hand(0.4, 0.5, 0.5)],
    });
    let frame = [0u8; 16];
    assert!(matches!(tracker.poll(&frame, 10.0), LandmarkInput::Detected(h) if h.len() == 1));
    assert!(matches!(tracker.poll(&frame, 10.0), LandmarkInput::Unchanged));
    assert!(matches!(tracker.poll(&frame, 20.0), LandmarkInput::Detected(_)));
    assert_eq!(tracker.detector_mut().calls, 2);

    tracker.reset();
    assert!(matches!(tracker.poll(&frame, 20.0), LandmarkInput::Detected(_)));
    assert_eq!(tracker.detector_mut().calls, 3);
}

#[test]
fn tracker_output_feeds_the_estimator() {
    let mut tracker = GestureTracker::new(CountingDetector {
        calls: 0,
        hands: smallvec![hand(0.3, 0.5, 0.6), hand(0.7, 0.5, 0.6)],
    });
    let mut g = tracking();
    let frame = [0u8; 4];
    for ts in 0..30 {
        g.update(tracker.poll(&frame, ts as f64 * 33.0));
    }
    assert!(g.state().has_hands);
    assert!(g.state().scale > 1.0);
}
