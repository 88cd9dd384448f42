// Microphone capture (cpal). The input callback overwrites a shared byte
// waveform; the frame loop copies the latest snapshot.

use std::sync::{Arc, Mutex};

use aura_core::constants::WAVEFORM_MIDLINE;
use aura_core::{DeviceError, DeviceKind};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};

/// Samples kept per snapshot (one analyser window).
pub const WAVEFORM_LEN: usize = 1024;

/// Map a [-1, 1] sample to the 0..=255 byte range with 128 as silence.
#[inline]
pub fn sample_to_byte(s: f32) -> u8 {
    let s = if s.is_finite() { s.clamp(-1.0, 1.0) } else { 0.0 };
    (WAVEFORM_MIDLINE + s * 127.0).round() as u8
}

/// Append `fresh` to `wave`, dropping the oldest bytes so at most
/// `WAVEFORM_LEN` remain. Never grows `wave` past that length, so a buffer
/// created with that capacity is not reallocated.
pub fn push_newest<I>(wave: &mut Vec<u8>, fresh: I)
where
    I: ExactSizeIterator<Item = u8>,
{
    let excess = fresh.len().saturating_sub(WAVEFORM_LEN);
    let fresh = fresh.skip(excess);
    let keep = WAVEFORM_LEN - fresh.len();
    let start = wave.len().saturating_sub(keep);
    wave.drain(..start);
    wave.extend(fresh);
}

fn unavailable(reason: impl ToString) -> DeviceError {
    DeviceError::Unavailable {
        device: DeviceKind::Microphone,
        reason: reason.to_string(),
    }
}

pub struct MicCapture {
    // Dropping the stream releases the device.
    _stream: cpal::Stream,
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MicCapture {
    pub fn start() -> Result<Self, DeviceError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| unavailable("no default input device"))?;
        let config = device.default_input_config().map_err(unavailable)?;
        let channels = config.channels() as usize;
        let buffer = Arc::new(Mutex::new(vec![WAVEFORM_MIDLINE as u8; WAVEFORM_LEN]));

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config.into(), channels, Arc::clone(&buffer)),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config.into(), channels, Arc::clone(&buffer)),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config.into(), channels, Arc::clone(&buffer)),
            other => return Err(unavailable(format!("unsupported sample format {other:?}"))),
        }
        .map_err(|e| match e {
            cpal::BuildStreamError::DeviceNotAvailable => DeviceError::PermissionDenied(DeviceKind::Microphone),
            e => unavailable(e),
        })?;
        stream.play().map_err(unavailable)?;

        let name = device.name().unwrap_or_else(|_| "unknown".into());
        log::info!("[audio] capturing from {} ({} ch)", name, channels);
        Ok(Self {
            _stream: stream,
            buffer,
        })
    }

    /// Copy the latest waveform into `out`. Returns false if the callback
    /// thread poisoned the buffer.
    pub fn snapshot(&self, out: &mut Vec<u8>) -> bool {
        match self.buffer.lock() {
            Ok(guard) => {
                out.clear();
                out.extend_from_slice(&guard);
                true
            }
            Err(_) => false,
        }
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    buffer: Arc<Mutex<Vec<u8>>>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = channels.max(1);
    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let Ok(mut wave) = buffer.lock() else {
                return;
            };
            let frames = data.len() / channels;
            let skip = frames.saturating_sub(WAVEFORM_LEN);
            let fresh = data
                .chunks(channels)
                .skip(skip)
                .map(|frame| sample_to_byte(frame[0].to_sample::<f32>()));
            push_newest(&mut wave, fresh);
        },
        |err| log::warn!("[audio] input stream error: {err}"),
        None,
    )
}
