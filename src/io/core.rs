use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;
use thiserror::Error;
use crate::signal_processing::preprocess::downmix;
use crate::signal_processing::resampling::resample;

/// Custom error types for audio analysis operations.
///
/// Covers the I/O boundary (WAV reading/writing) as well as the
/// precondition violations of the analysis functions themselves.
#[derive(Error, Debug)]
pub enum AudioError {
    /// Error when opening or decoding a WAV file.
    #[error("Failed to open WAV file: {0}")]
    OpenError(#[from] hound::Error),

    /// Error when the WAV format is not supported.
    #[error("Unsupported WAV format")]
    UnsupportedFormat,

    /// Error when a specified offset or duration is invalid.
    #[error("Invalid offset or duration")]
    InvalidRange,

    /// General I/O error during audio processing.
    #[error("Audio IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error during resampling.
    #[error("Resample error: {0}")]
    ResampleError(#[from] crate::signal_processing::resampling::ResampleError),

    /// Error when there is not enough data for an operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error when input parameters are invalid.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error when a feature, novelty, or pitch tracker name cannot be resolved.
    #[error("Unknown feature name: {0}")]
    UnknownFeature(String),
}

/// Audio samples plus the metadata needed to interpret them.
pub struct AudioData {
    /// Audio samples as 32-bit floats in [-1, 1], interleaved if multi-channel
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of audio channels
    pub channels: u16,
}

/// Loads audio data from a WAV file.
///
/// Integer PCM is scaled to [-1, 1) by `2^(bits-1)`; floating-point WAV data
/// is passed through unchanged. Multi-channel input is downmixed to mono
/// unless `mono` is `Some(false)`.
///
/// # Arguments
/// * `path` - Path to the WAV file
/// * `sr` - Optional target sample rate for resampling
/// * `mono` - Optional flag to downmix to mono (defaults to true)
///
/// # Returns
/// Returns `Result<AudioData, AudioError>` containing the decoded audio data
/// or an error if loading fails.
pub fn load<P: AsRef<Path>>(
    path: P,
    sr: Option<u32>,
    mono: Option<bool>,
) -> Result<AudioData, AudioError> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let sample_rate = spec.sample_rate;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<f32>, hound::Error>>()?,
        SampleFormat::Int => {
            let scale = 1.0 / (1u32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<Vec<f32>, hound::Error>>()?
        }
    };

    let channels = spec.channels as usize;
    let samples = if channels > 1 && mono.unwrap_or(true) {
        downmix(&samples, channels)
    } else {
        samples
    };

    let samples = match sr {
        Some(target_sr) if target_sr != sample_rate => resample(&samples, sample_rate, target_sr)?,
        _ => samples,
    };

    Ok(AudioData {
        samples,
        sample_rate: sr.unwrap_or(sample_rate),
        channels: if mono.unwrap_or(true) { 1 } else { spec.channels },
    })
}

/// Exports audio data to a 32-bit float WAV file.
///
/// # Arguments
/// * `path` - Path to the output WAV file
/// * `audio_data` - Audio data to be exported
pub fn export_to_wav<P: AsRef<Path>>(path: P, audio_data: &AudioData) -> Result<(), AudioError> {
    let spec = WavSpec {
        channels: audio_data.channels,
        sample_rate: audio_data.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for sample in &audio_data.samples {
        writer.write_sample(*sample)?;
    }
    writer.finalize()?;

    Ok(())
}

/// Gets the sample rate of a WAV file.
pub fn get_sr<P: AsRef<Path>>(path: P) -> Result<u32, AudioError> {
    let reader = WavReader::open(path)?;
    Ok(reader.spec().sample_rate)
}
