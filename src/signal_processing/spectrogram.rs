use ndarray::{Array1, Array2, Axis};
use num_complex::Complex;
use rustfft::FftPlanner;
use std::f32::consts::SQRT_2;

use crate::io::core::AudioError;
use crate::signal_processing::blocking::block_audio;
use crate::signal_processing::preprocess::preprocess_audio;
use crate::signal_processing::window::hann_periodic;
use crate::features::filterbank::mel_filterbank;
use crate::utils::conversion::fft_frequencies;

/// Computes a one-sided magnitude spectrogram.
///
/// The signal is pre-processed (peak-normalized unless disabled), blocked,
/// windowed (periodic Hann unless a window is supplied) and transformed; each
/// spectrum is scaled by `2 / block_length` and truncated to
/// `block_length/2 + 1` bins. With `normalize` enabled the DC and Nyquist
/// bins are divided by `sqrt(2)` to correct for the one-sided folding.
///
/// For a full-scale sinusoid exactly on a bin, analyzed with a rectangular
/// window and `normalize = false`, the magnitude at that bin equals the
/// sinusoid's amplitude.
///
/// # Arguments
/// * `x` - Mono audio signal
/// * `f_s` - Sample rate of the audio data
/// * `window` - Optional analysis window; must have length `block_length`
/// * `block_length` - Optional block length (default: 4096)
/// * `hop_length` - Optional hop length (default: 2048)
/// * `normalize` - Optional normalization flag (default: true)
///
/// # Returns
/// Returns `(X, f, t)`: the spectrogram of shape `(block_length/2 + 1,
/// num_blocks)`, the bin frequencies in Hz, and the block time stamps.
pub fn compute_spectrogram(
    x: &[f32],
    f_s: f32,
    window: Option<&Array1<f32>>,
    block_length: Option<usize>,
    hop_length: Option<usize>,
    normalize: Option<bool>,
) -> Result<(Array2<f32>, Vec<f32>, Vec<f32>), AudioError> {
    let (spec, f, t) = compute_complex_spectrogram(x, f_s, window, block_length, hop_length, normalize)?;
    Ok((spec.mapv(|v| v.norm()), f, t))
}

/// Computes a one-sided complex spectrogram.
///
/// Identical to [`compute_spectrogram`] except that the complex spectra are
/// returned instead of their magnitudes.
pub fn compute_complex_spectrogram(
    x: &[f32],
    f_s: f32,
    window: Option<&Array1<f32>>,
    block_length: Option<usize>,
    hop_length: Option<usize>,
    normalize: Option<bool>,
) -> Result<(Array2<Complex<f32>>, Vec<f32>, Vec<f32>), AudioError> {
    let block_length = block_length.unwrap_or(4096);
    let hop_length = hop_length.unwrap_or(2048);
    let normalize = normalize.unwrap_or(true);

    let default_window;
    let window = match window {
        Some(w) => {
            if w.len() != block_length {
                return Err(AudioError::InvalidInput(format!(
                    "invalid window dimension: {} != {}",
                    w.len(),
                    block_length
                )));
            }
            w
        }
        None => {
            default_window = hann_periodic(block_length);
            &default_window
        }
    };

    let x_pp = preprocess_audio(x, 1, Some(normalize));
    let (blocks, t) = block_audio(&x_pp, block_length, hop_length, f_s)?;

    let num_bins = block_length / 2 + 1;
    let num_blocks = blocks.nrows();
    let scale = 2.0 / block_length as f32;

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(block_length);

    let mut spec = Array2::<Complex<f32>>::zeros((num_bins, num_blocks));
    let mut buffer = vec![Complex::new(0.0, 0.0); block_length];

    for (n, block) in blocks.axis_iter(Axis(0)).enumerate() {
        for (i, (&sample, &w)) in block.iter().zip(window.iter()).enumerate() {
            buffer[i] = Complex::new(sample * w, 0.0);
        }
        fft.process(&mut buffer);
        for k in 0..num_bins {
            spec[[k, n]] = buffer[k] * scale;
        }
    }

    if normalize && num_blocks > 0 {
        for n in 0..num_blocks {
            spec[[0, n]] = spec[[0, n]] / SQRT_2;
            spec[[num_bins - 1, n]] = spec[[num_bins - 1, n]] / SQRT_2;
        }
    }

    let f = fft_frequencies(f_s, block_length);

    Ok((spec, f, t))
}

/// Computes a mel spectrogram by applying a triangular mel filter bank to the
/// magnitude spectrogram.
///
/// # Arguments
/// * `x` - Mono audio signal
/// * `f_s` - Sample rate of the audio data
/// * `window` - Optional analysis window; must have length `block_length`
/// * `logarithmic` - Optional flag to return `20*log10(M + 1e-12)` (default: true)
/// * `block_length` - Optional block length (default: 4096)
/// * `hop_length` - Optional hop length (default: 2048)
/// * `num_mel_bands` - Optional number of mel bands (default: 128)
/// * `f_max` - Optional upper band edge in Hz (default: `f_s / 2`)
///
/// # Returns
/// Returns `(M, f_c, t)`: the mel spectrogram of shape `(num_mel_bands,
/// num_blocks)`, the band center frequencies, and the block time stamps.
pub fn compute_mel_spectrogram(
    x: &[f32],
    f_s: f32,
    window: Option<&Array1<f32>>,
    logarithmic: Option<bool>,
    block_length: Option<usize>,
    hop_length: Option<usize>,
    num_mel_bands: Option<usize>,
    f_max: Option<f32>,
) -> Result<(Array2<f32>, Vec<f32>, Vec<f32>), AudioError> {
    let block_length = block_length.unwrap_or(4096);
    let num_mel_bands = num_mel_bands.unwrap_or(128);
    let f_max = f_max.unwrap_or(f_s / 2.0);

    let (spec, _, t) =
        compute_spectrogram(x, f_s, window, Some(block_length), hop_length, Some(true))?;

    let (h, f_c) = mel_filterbank(block_length / 2 + 1, f_s, num_mel_bands, f_max);
    let mut m = h.dot(&spec);

    if logarithmic.unwrap_or(true) {
        m.mapv_inplace(|v| 20.0 * (v + 1e-12).log10());
    }

    Ok((m, f_c, t))
}
