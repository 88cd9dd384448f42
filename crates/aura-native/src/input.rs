// Keyboard and pointer handling for the native window.
// Kept free of winit types so host tests can include this file directly.

use aura_core::{Configuration, Rgb, Shape};
use glam::Vec2;

/// Colors cycled by the `C` key.
pub const SWATCHES: [&str; 6] = ["#00f3ff", "#ff2d95", "#ffd400", "#7cff4f", "#b06bff", "#ffffff"];

pub const SIZE_STEP: f32 = 0.25;
pub const SIZE_MIN: f32 = 0.25;
pub const SIZE_MAX: f32 = 3.5;
pub const NOISE_STEP: f32 = 0.05;
pub const NOISE_MAX: f32 = 2.0;
pub const COUNT_STEP: usize = 2000;
pub const COUNT_MIN: usize = 2000;
pub const COUNT_MAX: usize = 30_000;

/// Side effects a key press asks of the frame loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Reconfigured,
    ToggleMicrophone,
}

#[inline]
pub fn shape_for_digit(key: &str) -> Option<Shape> {
    match key {
        "1" => Some(Shape::Sphere),
        "2" => Some(Shape::Heart),
        "3" => Some(Shape::Flower),
        "4" => Some(Shape::Saturn),
        "5" => Some(Shape::Fireworks),
        _ => None,
    }
}

/// Window pixel position to normalized device coordinates (+Y up).
pub fn cursor_to_ndc(x: f64, y: f64, width: u32, height: u32) -> Option<Vec2> {
    if width == 0 || height == 0 {
        return None;
    }
    let nx = (x / width as f64) * 2.0 - 1.0;
    let ny = 1.0 - (y / height as f64) * 2.0;
    let ndc = Vec2::new(nx as f32, ny as f32);
    ndc.is_finite().then_some(ndc)
}

/// The configuration the window edits, plus the live pointer.
#[derive(Clone, Debug, Default)]
pub struct Controls {
    config: Configuration,
    pointer: Option<Vec2>,
    swatch: usize,
}

impl Controls {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            pointer: None,
            swatch: 0,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64, width: u32, height: u32) {
        self.pointer = cursor_to_ndc(x, y, width, height);
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    /// Apply a key press. Values are kept inside the ranges the core accepts.
    pub fn key_pressed(&mut self, key: &str) -> Option<Action> {
        if let Some(shape) = shape_for_digit(key) {
            if shape == self.config.shape {
                return None;
            }
            self.config.shape = shape;
            log::info!("[input] shape={}", shape);
            return Some(Action::Reconfigured);
        }
        let c = &mut self.config;
        match key {
            " " => return Some(Action::ToggleMicrophone),
            "c" | "C" => {
                self.swatch = (self.swatch + 1) % SWATCHES.len();
                match Rgb::from_hex(SWATCHES[self.swatch]) {
                    Ok(color) => c.color = color,
                    Err(e) => {
                        log::warn!("[input] {}", e);
                        return None;
                    }
                }
                log::info!("[input] color={}", SWATCHES[self.swatch]);
            }
            "+" | "=" => c.size = (c.size + SIZE_STEP).min(SIZE_MAX),
            "-" | "_" => c.size = (c.size - SIZE_STEP).max(SIZE_MIN),
            "m" | "M" => c.noise = (c.noise + NOISE_STEP).min(NOISE_MAX),
            "n" | "N" => c.noise = (c.noise - NOISE_STEP).max(0.0),
            "]" => c.count = (c.count + COUNT_STEP).min(COUNT_MAX),
            "[" => c.count = c.count.saturating_sub(COUNT_STEP).max(COUNT_MIN),
            _ => return None,
        }
        Some(Action::Reconfigured)
    }
}
