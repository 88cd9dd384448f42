//! Audio band estimator: reduces byte spectra and microphone waveforms to a
//! handful of smoothed energies plus a decaying beat accumulator.
//!
//! Both inputs are optional per frame. A missing spectrum is the normal
//! "nothing playing" case and takes the decay path; the microphone path only
//! runs while it is enabled and adds on top of the spectrum path.

use crate::constants::*;

/// Smoothed audio features committed once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioBandState {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
    pub rms: f32,
    pub beat_signal: f32,
    pub microphone_level: f32,
    /// The latest spectrum carried audible energy (raw rms above threshold).
    pub energetic: bool,
    /// `min(microphone_level * sensitivity, 1)` for this frame, 0 when the mic is off.
    pub mic_influence: f32,
}

/// Unsmoothed band energies of one spectrum snapshot, each in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandLevels {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
    pub rms: f32,
}

#[inline]
fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[inline]
fn smooth(current: f32, target: f32, alpha: f32) -> f32 {
    current + (target - current) * alpha
}

/// Mean of `bins` normalized to [0, 1]; 0 for an empty slice.
fn band_mean(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / bins.len() as f32 / 255.0
}

/// Split a byte spectrum into bass/mid/treble/rms.
///
/// Bands are compressed with `x^1.5` so quiet material stays quiet. Spectra
/// shorter than a band's range simply leave that band at 0.
pub fn band_levels(spectrum: &[u8]) -> BandLevels {
    let len = spectrum.len();
    let slice = |start: usize, end: usize| &spectrum[start.min(len)..end.min(len)];
    let bass = band_mean(slice(BASS_BINS.start, BASS_BINS.end)).powf(BAND_COMPRESSION_EXP);
    let mid = band_mean(slice(MID_BINS.start, MID_BINS.end)).powf(BAND_COMPRESSION_EXP);
    let treble = band_mean(slice(TREBLE_START_BIN, len)).powf(BAND_COMPRESSION_EXP);
    let rms = band_mean(spectrum);
    BandLevels {
        bass: sanitize(bass),
        mid: sanitize(mid),
        treble: sanitize(treble),
        rms: sanitize(rms),
    }
}

/// Mean absolute deviation of a byte waveform from its 128 midline, in [0, 1].
pub fn waveform_level(samples: &[u8]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let accum: f32 = samples
        .iter()
        .map(|&s| (s as f32 - WAVEFORM_MIDLINE).abs())
        .sum();
    sanitize(accum / (samples.len() as f32 * WAVEFORM_MIDLINE))
}

#[derive(Clone, Debug)]
pub struct AudioBandEstimator {
    state: AudioBandState,
    mic_enabled: bool,
    mic_sensitivity: f32,
}

impl Default for AudioBandEstimator {
    fn default() -> Self {
        Self {
            state: AudioBandState::default(),
            mic_enabled: false,
            mic_sensitivity: MIC_DEFAULT_SENSITIVITY,
        }
    }
}

impl AudioBandEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AudioBandState {
        &self.state
    }

    pub fn mic_enabled(&self) -> bool {
        self.mic_enabled
    }

    pub fn mic_sensitivity(&self) -> f32 {
        self.mic_sensitivity
    }

    pub fn enable_microphone(&mut self, sensitivity: f32) {
        self.mic_enabled = true;
        self.set_sensitivity(sensitivity);
        log::info!("[audio] microphone enabled sensitivity={:.2}", self.mic_sensitivity);
    }

    /// Stop consuming microphone data; the level decays from here on.
    pub fn disable_microphone(&mut self) {
        if self.mic_enabled {
            log::info!("[audio] microphone disabled");
        }
        self.mic_enabled = false;
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.mic_sensitivity = if sensitivity.is_finite() {
            sensitivity.clamp(0.0, MIC_MAX_SENSITIVITY)
        } else {
            MIC_DEFAULT_SENSITIVITY
        };
    }

    /// Run one frame: `spectrum` from the playing source, `waveform` from the
    /// microphone (ignored while the mic is disabled).
    pub fn update(&mut self, spectrum: Option<&[u8]>, waveform: Option<&[u8]>) -> &AudioBandState {
        self.update_spectrum(spectrum);
        self.update_waveform(waveform);
        &self.state
    }

    /// Fold one spectrum snapshot (or its absence) into the smoothed state.
    pub fn update_spectrum(&mut self, spectrum: Option<&[u8]>) {
        let s = &mut self.state;
        match spectrum.filter(|bins| !bins.is_empty()) {
            Some(bins) => {
                let raw = band_levels(bins);
                s.bass = sanitize(smooth(s.bass, raw.bass, BASS_ALPHA));
                s.mid = sanitize(smooth(s.mid, raw.mid, MID_ALPHA));
                s.treble = sanitize(smooth(s.treble, raw.treble, TREBLE_ALPHA));
                s.rms = sanitize(smooth(s.rms, raw.rms, RMS_ALPHA));
                s.energetic = raw.rms > ENERGY_RMS_THRESHOLD;
            }
            None => {
                s.bass = sanitize(smooth(s.bass, 0.0, BASS_ALPHA));
                s.mid = sanitize(smooth(s.mid, 0.0, MID_ALPHA));
                s.treble = sanitize(smooth(s.treble, 0.0, TREBLE_ALPHA));
                s.rms = sanitize(smooth(s.rms, 0.0, RMS_ALPHA));
                s.energetic = false;
            }
        }
        let beat = if s.beat_signal.is_finite() { s.beat_signal } else { 0.0 };
        s.beat_signal = if s.energetic {
            sanitize(beat + s.bass.min(BEAT_BASS_CAP) * BEAT_BASS_GAIN)
        } else {
            sanitize(beat * BEAT_DECAY)
        };
    }

    /// Fold one microphone waveform snapshot into level, influence and beat.
    pub fn update_waveform(&mut self, waveform: Option<&[u8]>) {
        let sensitivity = self.mic_sensitivity;
        let s = &mut self.state;
        let level = match waveform.filter(|_| self.mic_enabled) {
            Some(samples) => waveform_level(samples),
            None => 0.0,
        };
        s.microphone_level = sanitize(smooth(s.microphone_level, level, MIC_ALPHA));
        s.mic_influence = if self.mic_enabled {
            sanitize(s.microphone_level * sensitivity)
        } else {
            0.0
        };
        s.beat_signal = sanitize(s.beat_signal + s.mic_influence * MIC_BEAT_GAIN);
    }
}
