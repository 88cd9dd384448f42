//! Gesture estimator: hand landmarks -> spread, scale and rotation.
//!
//! Per frame the estimator receives 0, 1 or 2 detected hands. Openness of the
//! hands drives `spread`, the distance between two wrists drives `scale`, and
//! wrist positions drive the three rotation channels. Without hands every
//! channel decays toward neutral at its own rate.

use crate::constants::*;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

/// One detected hand: 21 landmarks in normalized image coordinates
/// (x, y in [0, 1]) with a relative depth estimate in z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandLandmarks {
    pub points: [Vec3; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Vec3; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    pub fn wrist(&self) -> Vec3 {
        self.points[WRIST]
    }

    /// Hand openness in [0, 1]: 0 for a fist, 1 for a fully open hand.
    pub fn openness(&self) -> f32 {
        let wrist = self.wrist().truncate();
        let mean = FINGERTIPS
            .iter()
            .map(|&tip| self.points[tip].truncate().distance(wrist))
            .sum::<f32>()
            / FINGERTIPS.len() as f32;
        let open = (mean - OPENNESS_CLOSED) / (OPENNESS_OPEN - OPENNESS_CLOSED);
        if open.is_finite() {
            open.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Smoothed gesture transform committed once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureState {
    pub has_hands: bool,
    pub spread: f32,
    pub scale: f32,
    pub rotation: Vec3,
    pub is_closed: bool,
    /// Wrist positions of the detected hands, for display only.
    pub hands: SmallVec<[Vec3; 2]>,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            has_hands: false,
            spread: 0.0,
            scale: 1.0,
            rotation: Vec3::ZERO,
            is_closed: true,
            hands: SmallVec::new(),
        }
    }
}

/// What the tracking provider delivered this tick.
#[derive(Clone, Copy, Debug)]
pub enum LandmarkInput<'a> {
    /// No new video frame since the last tick.
    Unchanged,
    /// Inference ran on a new frame; the slice may be empty.
    Detected(&'a [HandLandmarks]),
}

#[inline]
fn approach(current: f32, target: f32, rate: f32) -> f32 {
    current + (target - current) * rate
}

/// Rotation (x, y) implied by a point in normalized image coordinates.
#[inline]
fn tilt_from(p: Vec2) -> (f32, f32) {
    ((p.y - 0.5) * ROT_X_GAIN, (p.x - 0.5) * ROT_Y_GAIN)
}

#[derive(Clone, Debug, Default)]
pub struct GestureEstimator {
    state: GestureState,
    active: bool,
}

impl GestureEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Whether a camera feed is currently being tracked.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self) {
        self.active = true;
        log::info!("[gesture] tracking started");
    }

    /// Stop tracking; later ticks take the decay branch.
    pub fn stop(&mut self) {
        if self.active {
            log::info!("[gesture] tracking stopped");
        }
        self.active = false;
        self.state.has_hands = false;
        self.state.hands.clear();
    }

    /// Advance one tick.
    ///
    /// While tracking, an `Unchanged` input holds the last committed state.
    /// While not tracking, every tick decays toward neutral.
    pub fn update(&mut self, input: LandmarkInput<'_>) -> &GestureState {
        match (self.active, input) {
            (false, _) => self.decay(),
            (true, LandmarkInput::Unchanged) => {}
            (true, LandmarkInput::Detected(hands)) if hands.is_empty() => self.decay(),
            (true, LandmarkInput::Detected(hands)) => self.track(hands),
        }
        &self.state
    }

    /// Apply a frame with at least one hand.
    pub fn track(&mut self, hands: &[HandLandmarks]) {
        let hands = &hands[..hands.len().min(2)];
        if hands.is_empty() {
            self.decay();
            return;
        }
        let s = &mut self.state;
        s.has_hands = true;

        let raw_spread = hands.iter().map(HandLandmarks::openness).sum::<f32>() / hands.len() as f32;
        s.spread = approach(s.spread, raw_spread, SPREAD_RATE);

        match hands {
            [a, b] => {
                let w1 = a.wrist().truncate();
                let w2 = b.wrist().truncate();
                let d = w2 - w1;
                let scale = SCALE_BASE + (d.length() - SCALE_DIST_OFFSET) * SCALE_DIST_GAIN;
                let (rot_x, rot_y) = tilt_from((w1 + w2) * 0.5);
                let twist = d.y.atan2(d.x) * TWIST_GAIN;
                s.scale = approach(s.scale, scale, SCALE_RATE);
                s.rotation.x = approach(s.rotation.x, rot_x, ROT_XY_RATE);
                s.rotation.y = approach(s.rotation.y, rot_y, ROT_XY_RATE);
                s.rotation.z = approach(s.rotation.z, twist, ROT_Z_RATE);
            }
            [only] => {
                let (rot_x, rot_y) = tilt_from(only.wrist().truncate());
                s.rotation.x = approach(s.rotation.x, rot_x, ROT_XY_RATE);
                s.rotation.y = approach(s.rotation.y, rot_y, ROT_XY_RATE);
            }
            _ => {}
        }

        s.is_closed = s.spread < CLOSED_SPREAD_THRESHOLD;
        s.hands = hands.iter().map(HandLandmarks::wrist).collect();
    }

    /// The no-hands branch: relax every channel toward neutral.
    pub fn decay(&mut self) {
        let s = &mut self.state;
        s.has_hands = false;
        s.hands.clear();
        s.spread *= SPREAD_DECAY;
        s.scale += (1.0 - s.scale) * SCALE_RELAX;
        s.rotation.x *= ROT_XY_DECAY;
        s.rotation.y *= ROT_XY_DECAY;
        s.rotation.z *= ROT_Z_DECAY;
        s.is_closed = s.spread < CLOSED_SPREAD_THRESHOLD;
    }
}

/// Gates inference to once per distinct video timestamp.
#[derive(Clone, Debug, Default)]
pub struct FrameGate {
    last_timestamp: Option<f64>,
}

impl FrameGate {
    /// True if `timestamp` differs from the last accepted one (and records it).
    pub fn accept(&mut self, timestamp: f64) -> bool {
        if self.last_timestamp == Some(timestamp) {
            return false;
        }
        self.last_timestamp = Some(timestamp);
        true
    }

    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}

/// Opaque hand-landmark inference provider.
pub trait LandmarkDetector {
    /// Image type of one video frame.
    type Frame: ?Sized;

    /// Detect up to two hands in `frame`, captured at `timestamp_ms`.
    fn detect(&mut self, frame: &Self::Frame, timestamp_ms: f64) -> SmallVec<[HandLandmarks; 2]>;
}

/// Detector + frame gate, producing the [`LandmarkInput`] for one tick.
pub struct GestureTracker<D: LandmarkDetector> {
    detector: D,
    gate: FrameGate,
    last: SmallVec<[HandLandmarks; 2]>,
}

impl<D: LandmarkDetector> GestureTracker<D> {
    pub fn new(detector: D) -> Self {
        Self {
            detector,
            gate: FrameGate::default(),
            last: SmallVec::new(),
        }
    }

    /// Run the detector if `timestamp_ms` is a new video frame.
    pub fn poll(&mut self, frame: &D::Frame, timestamp_ms: f64) -> LandmarkInput<'_> {
        if !self.gate.accept(timestamp_ms) {
            return LandmarkInput::Unchanged;
        }
        self.last = self.detector.detect(frame, timestamp_ms);
        LandmarkInput::Detected(&self.last)
    }

    /// Forget the last processed frame (used when the camera stops).
    pub fn reset(&mut self) {
        self.gate.reset();
        self.last.clear();
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }
}
