//! Fundamental frequency tracking for monophonic audio.

mod spectral_domain;
mod time_domain;

use std::str::FromStr;

use ndarray::Array1;

use crate::io::AudioError;
use crate::signal_processing::{compute_spectrogram, preprocess_audio};

pub use spectral_domain::{pitch_spectral_acf, pitch_spectral_hps};
pub use time_domain::{pitch_time_acf, pitch_time_amdf, pitch_time_zero_crossings};

/// The supported pitch trackers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchTracker {
    SpectralAcf,
    SpectralHps,
    TimeAcf,
    TimeAmdf,
    TimeZeroCrossings,
}

impl PitchTracker {
    pub fn name(&self) -> &'static str {
        match self {
            PitchTracker::SpectralAcf => "SpectralAcf",
            PitchTracker::SpectralHps => "SpectralHps",
            PitchTracker::TimeAcf => "TimeAcf",
            PitchTracker::TimeAmdf => "TimeAmdf",
            PitchTracker::TimeZeroCrossings => "TimeZeroCrossings",
        }
    }
}

impl FromStr for PitchTracker {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SpectralAcf" => Ok(PitchTracker::SpectralAcf),
            "SpectralHps" => Ok(PitchTracker::SpectralHps),
            "TimeAcf" => Ok(PitchTracker::TimeAcf),
            "TimeAmdf" => Ok(PitchTracker::TimeAmdf),
            "TimeZeroCrossings" => Ok(PitchTracker::TimeZeroCrossings),
            _ => Err(AudioError::UnknownFeature(s.to_string())),
        }
    }
}

/// Computes the fundamental frequency per block with the selected tracker.
///
/// The signal is pre-processed first; spectral trackers operate on its
/// magnitude spectrogram, the time-domain trackers on its blocks.
///
/// # Arguments
/// * `tracker` - The pitch tracker
/// * `x` - Mono audio signal
/// * `f_s` - Sample rate of the audio data
/// * `window` - Optional analysis window for the spectral trackers
/// * `block_length` - Optional block length (default: 4096)
/// * `hop_length` - Optional hop length (default: 2048)
///
/// # Returns
/// Returns `(f_0, t)`: the per-block fundamental in Hz and the block time
/// stamps.
pub fn compute_pitch(
    tracker: PitchTracker,
    x: &[f32],
    f_s: f32,
    window: Option<&Array1<f32>>,
    block_length: Option<usize>,
    hop_length: Option<usize>,
) -> Result<(Array1<f32>, Vec<f32>), AudioError> {
    let block_length = block_length.unwrap_or(4096);
    let hop_length = hop_length.unwrap_or(2048);

    match tracker {
        PitchTracker::SpectralAcf | PitchTracker::SpectralHps => {
            let (spec, _, t) = compute_spectrogram(
                x,
                f_s,
                window,
                Some(block_length),
                Some(hop_length),
                Some(true),
            )?;
            let f_0 = match tracker {
                PitchTracker::SpectralAcf => pitch_spectral_acf(&spec, f_s),
                _ => pitch_spectral_hps(&spec, f_s),
            };
            Ok((f_0, t))
        }
        PitchTracker::TimeAcf | PitchTracker::TimeAmdf | PitchTracker::TimeZeroCrossings => {
            let x_pp = preprocess_audio(x, 1, None);
            match tracker {
                PitchTracker::TimeAcf => pitch_time_acf(&x_pp, block_length, hop_length, f_s),
                PitchTracker::TimeAmdf => pitch_time_amdf(&x_pp, block_length, hop_length, f_s),
                _ => pitch_time_zero_crossings(&x_pp, block_length, hop_length, f_s),
            }
        }
    }
}
