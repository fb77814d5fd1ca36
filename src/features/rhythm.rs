use ndarray::{Array1, Axis};

use crate::io::AudioError;
use crate::novelty::{Novelty, compute_novelty};
use crate::signal_processing::{compute_spectrogram, hann_periodic};

/// How the beat histogram is derived from the novelty function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeatHistoMethod {
    /// Autocorrelation of the novelty function.
    Corr,
    /// Magnitude spectrum of the novelty function, restricted to 30-200 BPM.
    Fft,
}

/// Computes a simple beat histogram from the spectral-flux novelty function.
///
/// The novelty function is extracted with a short hop (default 8 samples at
/// block length 1024) so that its sample rate resolves tempo periods. With
/// [`BeatHistoMethod::Corr`] the histogram is the flipped positive-lag
/// autocorrelation against a flipped `60 / t` BPM axis; with
/// [`BeatHistoMethod::Fft`] it is the column-averaged magnitude spectrum of
/// the zero-padded novelty function against `f * 60`, restricted to the
/// 30-200 BPM range.
///
/// # Arguments
/// * `x` - Mono audio signal
/// * `f_s` - Sample rate of the audio data
/// * `method` - Optional histogram method (default: [`BeatHistoMethod::Fft`])
/// * `window` - Optional analysis window; must have length `block_length`
/// * `block_length` - Optional novelty block length (default: 1024)
/// * `hop_length` - Optional novelty hop length (default: 8)
///
/// # Returns
/// Returns `(histo, bpm)`: the beat histogram and the BPM axis ticks.
pub fn compute_beat_histogram(
    x: &[f32],
    f_s: f32,
    method: Option<BeatHistoMethod>,
    window: Option<&Array1<f32>>,
    block_length: Option<usize>,
    hop_length: Option<usize>,
) -> Result<(Array1<f32>, Vec<f32>), AudioError> {
    let method = method.unwrap_or(BeatHistoMethod::Fft);
    let block_length = block_length.unwrap_or(1024);
    let hop_length = hop_length.unwrap_or(8);

    let (d, t, _) = compute_novelty(
        Novelty::Flux,
        x,
        f_s,
        window,
        Some(block_length),
        Some(hop_length),
    )?;

    match method {
        BeatHistoMethod::Corr => {
            let energy: f32 = d.iter().map(|&v| v * v).sum();
            let norm = if energy == 0.0 { 1.0 } else { energy };
            let num_lags = d.len().saturating_sub(1);

            // Positive lags only, highest lag (slowest tempo) first.
            let histo: Array1<f32> = (1..=num_lags)
                .rev()
                .map(|lag| {
                    d.iter()
                        .zip(d.iter().skip(lag))
                        .map(|(&a, &b)| a * b)
                        .sum::<f32>()
                        / norm
                })
                .collect();
            let bpm: Vec<f32> = t.iter().skip(1).rev().map(|&ti| 60.0 / ti).collect();
            Ok((histo, bpm))
        }
        BeatHistoMethod::Fft => {
            let histo_length = 65536;
            let mut spec_window = Array1::zeros(2 * histo_length);
            spec_window
                .slice_mut(ndarray::s![..histo_length])
                .assign(&hann_periodic(histo_length));

            let mut d = d.to_vec();
            d.resize(d.len().max(2 * histo_length), 0.0);

            // The novelty function is sampled once per hop.
            let novelty_sr = f_s / hop_length as f32;
            let (spec, f, _) = compute_spectrogram(
                &d,
                novelty_sr,
                Some(&spec_window),
                Some(2 * histo_length),
                Some(histo_length / 4),
                Some(true),
            )?;

            let mean = spec
                .mean_axis(Axis(1))
                .unwrap_or_else(|| Array1::zeros(spec.nrows()));
            let bpm_axis: Vec<f32> = f.iter().map(|&fi| fi * 60.0).collect();

            let lo = bpm_axis
                .iter()
                .rposition(|&b| b < 30.0)
                .unwrap_or(0);
            let hi = bpm_axis
                .iter()
                .position(|&b| b > 200.0)
                .unwrap_or(bpm_axis.len());

            let histo = mean.slice(ndarray::s![lo..hi]).to_owned();
            let bpm = bpm_axis[lo..hi].to_vec();
            Ok((histo, bpm))
        }
    }
}
