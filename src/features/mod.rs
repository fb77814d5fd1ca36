//! Instantaneous feature extraction: spectral and time-domain descriptors
//! plus a name-based dispatcher that computes any of them from raw samples.

pub mod filterbank;
pub mod rhythm;
pub mod spectral;
pub mod temporal;

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2, Axis};

use crate::io::AudioError;
use crate::signal_processing::{compute_spectrogram, preprocess_audio};

pub use rhythm::{BeatHistoMethod, compute_beat_histogram};
pub use spectral::{
    spectral_centroid, spectral_crest_factor, spectral_decrease, spectral_flatness,
    spectral_flux, spectral_kurtosis, spectral_mfccs, spectral_pitch_chroma, spectral_rolloff,
    spectral_skewness, spectral_slope, spectral_spread, spectral_tonal_power_ratio,
};
pub use temporal::{
    time_acf_coeff, time_max_acf, time_peak_envelope, time_rms, time_std,
    time_zero_crossing_rate,
};

/// The complete set of instantaneous features known to [`compute_feature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    SpectralCentroid,
    SpectralCrestFactor,
    SpectralDecrease,
    SpectralFlatness,
    SpectralFlux,
    SpectralKurtosis,
    SpectralMfccs,
    SpectralPitchChroma,
    SpectralRolloff,
    SpectralSkewness,
    SpectralSlope,
    SpectralSpread,
    SpectralTonalPowerRatio,
    TimeAcfCoeff,
    TimeMaxAcf,
    TimePeakEnvelope,
    TimeRms,
    TimeStd,
    TimeZeroCrossingRate,
}

impl Feature {
    /// All features, in name order.
    pub fn all() -> &'static [Feature] {
        use Feature::*;
        &[
            SpectralCentroid,
            SpectralCrestFactor,
            SpectralDecrease,
            SpectralFlatness,
            SpectralFlux,
            SpectralKurtosis,
            SpectralMfccs,
            SpectralPitchChroma,
            SpectralRolloff,
            SpectralSkewness,
            SpectralSlope,
            SpectralSpread,
            SpectralTonalPowerRatio,
            TimeAcfCoeff,
            TimeMaxAcf,
            TimePeakEnvelope,
            TimeRms,
            TimeStd,
            TimeZeroCrossingRate,
        ]
    }

    /// The canonical feature name as used by [`compute_feature`]'s callers.
    pub fn name(&self) -> &'static str {
        use Feature::*;
        match self {
            SpectralCentroid => "SpectralCentroid",
            SpectralCrestFactor => "SpectralCrestFactor",
            SpectralDecrease => "SpectralDecrease",
            SpectralFlatness => "SpectralFlatness",
            SpectralFlux => "SpectralFlux",
            SpectralKurtosis => "SpectralKurtosis",
            SpectralMfccs => "SpectralMfccs",
            SpectralPitchChroma => "SpectralPitchChroma",
            SpectralRolloff => "SpectralRolloff",
            SpectralSkewness => "SpectralSkewness",
            SpectralSlope => "SpectralSlope",
            SpectralSpread => "SpectralSpread",
            SpectralTonalPowerRatio => "SpectralTonalPowerRatio",
            TimeAcfCoeff => "TimeAcfCoeff",
            TimeMaxAcf => "TimeMaxAcf",
            TimePeakEnvelope => "TimePeakEnvelope",
            TimeRms => "TimeRms",
            TimeStd => "TimeStd",
            TimeZeroCrossingRate => "TimeZeroCrossingRate",
        }
    }

    /// Whether the feature operates on a spectrogram rather than on the raw
    /// time-domain blocks.
    pub fn is_spectral(&self) -> bool {
        self.name().starts_with("Spectral")
    }
}

impl FromStr for Feature {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::all()
            .iter()
            .find(|f| f.name() == s)
            .copied()
            .ok_or_else(|| AudioError::UnknownFeature(s.to_string()))
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Computes a single feature from raw samples.
///
/// Spectral features are computed on the magnitude spectrogram of the
/// pre-processed signal, time-domain features directly on its blocks. The
/// result always has one column per block; scalar features occupy a single
/// row, [`Feature::SpectralMfccs`] yields 13 rows,
/// [`Feature::SpectralPitchChroma`] 12 and [`Feature::TimePeakEnvelope`] 2.
///
/// # Arguments
/// * `feature` - The feature to compute
/// * `x` - Mono audio signal
/// * `f_s` - Sample rate of the audio data
/// * `window` - Optional analysis window for the spectral features
/// * `block_length` - Optional block length (default: 4096)
/// * `hop_length` - Optional hop length (default: 2048)
///
/// # Returns
/// Returns `(v, t)`: the feature matrix of shape `(rows, num_blocks)` and the
/// block time stamps.
pub fn compute_feature(
    feature: Feature,
    x: &[f32],
    f_s: f32,
    window: Option<&Array1<f32>>,
    block_length: Option<usize>,
    hop_length: Option<usize>,
) -> Result<(Array2<f32>, Vec<f32>), AudioError> {
    use Feature::*;

    if feature.is_spectral() {
        let (spec, _, t) =
            compute_spectrogram(x, f_s, window, block_length, hop_length, Some(true))?;
        let v = match feature {
            SpectralCentroid => into_row(spectral_centroid(&spec, f_s)),
            SpectralCrestFactor => into_row(spectral_crest_factor(&spec, f_s)),
            SpectralDecrease => into_row(spectral_decrease(&spec, f_s)),
            SpectralFlatness => into_row(spectral_flatness(&spec, f_s)),
            SpectralFlux => into_row(spectral_flux(&spec, f_s)),
            SpectralKurtosis => into_row(spectral_kurtosis(&spec, f_s)),
            SpectralMfccs => spectral_mfccs(&spec, f_s, None),
            SpectralPitchChroma => spectral_pitch_chroma(&spec, f_s),
            SpectralRolloff => into_row(spectral_rolloff(&spec, f_s, None)),
            SpectralSkewness => into_row(spectral_skewness(&spec, f_s)),
            SpectralSlope => into_row(spectral_slope(&spec, f_s)),
            SpectralSpread => into_row(spectral_spread(&spec, f_s)),
            SpectralTonalPowerRatio => into_row(spectral_tonal_power_ratio(&spec, f_s, None)),
            _ => unreachable!(),
        };
        return Ok((v, t));
    }

    // The time-domain route gets the same pre-processing the spectral route
    // receives inside the spectrogram.
    let x_pp = preprocess_audio(x, 1, Some(true));
    let block_length = Some(block_length.unwrap_or(4096));
    let hop_length = Some(hop_length.unwrap_or(2048));
    let (v, t) = match feature {
        TimeAcfCoeff => {
            let (v, t) = time_acf_coeff(&x_pp, block_length, hop_length, f_s, None)?;
            (into_row(v), t)
        }
        TimeMaxAcf => {
            let (v, t) = time_max_acf(&x_pp, block_length, hop_length, f_s, None, None)?;
            (into_row(v), t)
        }
        TimePeakEnvelope => time_peak_envelope(&x_pp, block_length, hop_length, f_s)?,
        TimeRms => {
            let (v, t) = time_rms(&x_pp, block_length, hop_length, f_s)?;
            (into_row(v), t)
        }
        TimeStd => {
            let (v, t) = time_std(&x_pp, block_length, hop_length, f_s)?;
            (into_row(v), t)
        }
        TimeZeroCrossingRate => {
            let (v, t) = time_zero_crossing_rate(&x_pp, block_length, hop_length, f_s)?;
            (into_row(v), t)
        }
        _ => unreachable!(),
    };
    Ok((v, t))
}

fn into_row(v: Array1<f32>) -> Array2<f32> {
    v.insert_axis(Axis(0))
}
