//! Time-bounded easing used for shape morphs and color fades.

use glam::Vec3;

/// Easing curves applied to normalized tween progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Cubic ease-in-out (slow start and end).
    CubicInOut,
}

impl Easing {
    /// Map `t` in [0, 1] to eased progress in [0, 1]. Monotonic for every variant.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Easing::Linear => t,
            Easing::QuadraticOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

/// Elapsed-time tween from 0 to 1 over a fixed duration.
#[derive(Clone, Debug)]
pub struct Tween {
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
            easing,
        }
    }

    /// A tween that has already reached its end.
    pub fn finished(duration: f32, easing: Easing) -> Self {
        let mut t = Self::new(duration, easing);
        t.elapsed = t.duration;
        t
    }

    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }

    /// Advance by `dt` seconds; negative or non-finite steps are ignored.
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Eased progress in [0, 1].
    pub fn value(&self) -> f32 {
        self.easing.apply(self.elapsed / self.duration)
    }
}

/// Continuous fade of the uniform color toward the configured color.
#[derive(Clone, Debug)]
pub struct ColorTween {
    from: Vec3,
    to: Vec3,
    tween: Tween,
}

impl ColorTween {
    pub fn new(color: Vec3, duration: f32) -> Self {
        Self {
            from: color,
            to: color,
            tween: Tween::finished(duration, Easing::QuadraticOut),
        }
    }

    /// Start a new fade from the color currently shown.
    pub fn retarget(&mut self, to: Vec3) {
        self.from = self.current();
        self.to = to;
        self.tween.restart();
    }

    pub fn advance(&mut self, dt: f32) {
        self.tween.advance(dt);
    }

    pub fn current(&self) -> Vec3 {
        self.from.lerp(self.to, self.tween.value())
    }

    pub fn target(&self) -> Vec3 {
        self.to
    }

    pub fn is_done(&self) -> bool {
        self.tween.is_done()
    }
}
