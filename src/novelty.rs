//! Novelty functions for onset detection, with adaptive-threshold peak
//! picking.

use std::str::FromStr;

use ndarray::{Array1, Array2};

use crate::io::AudioError;
use crate::signal_processing::compute_spectrogram;

/// The supported novelty measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Novelty {
    Flux,
    Laroche,
    Hainsworth,
}

impl Novelty {
    pub fn name(&self) -> &'static str {
        match self {
            Novelty::Flux => "Flux",
            Novelty::Laroche => "Laroche",
            Novelty::Hainsworth => "Hainsworth",
        }
    }
}

impl FromStr for Novelty {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Flux" => Ok(Novelty::Flux),
            "Laroche" => Ok(Novelty::Laroche),
            "Hainsworth" => Ok(Novelty::Hainsworth),
            _ => Err(AudioError::UnknownFeature(s.to_string())),
        }
    }
}

/// Spectral-flux novelty: the half-wave rectified magnitude difference
/// between consecutive columns, reduced to its Euclidean norm over the bins.
/// The first column's predecessor is itself, so the first value is 0.
pub fn novelty_flux(spec: &Array2<f32>, _f_s: f32) -> Array1<f32> {
    let num_bins = spec.nrows() as f32;

    (0..spec.ncols())
        .map(|n| {
            let prev = spec.column(if n == 0 { 0 } else { n - 1 });
            let diff: f32 = spec
                .column(n)
                .iter()
                .zip(prev.iter())
                .map(|(&a, &b)| (a - b).max(0.0).powi(2))
                .sum();
            diff.sqrt() / num_bins
        })
        .collect()
}

/// Laroche's novelty: the bin-wise difference of the square-rooted
/// magnitudes, averaged over the bins without rectification. The first
/// column is compared against its own un-rooted magnitudes.
pub fn novelty_laroche(spec: &Array2<f32>, _f_s: f32) -> Array1<f32> {
    let num_bins = spec.nrows() as f32;

    (0..spec.ncols())
        .map(|n| {
            let cur = spec.column(n);
            let diff: f32 = if n == 0 {
                cur.iter().map(|&v| v.sqrt() - v).sum()
            } else {
                cur.iter()
                    .zip(spec.column(n - 1).iter())
                    .map(|(&a, &b)| a.sqrt() - b.sqrt())
                    .sum()
            };
            diff / num_bins
        })
        .collect()
}

/// Hainsworth's novelty: the bin-wise log2 magnitude ratio between
/// consecutive columns, averaged over the bins. Non-positive magnitudes are
/// clamped to 1e-5 before the ratio.
pub fn novelty_hainsworth(spec: &Array2<f32>, _f_s: f32) -> Array1<f32> {
    let num_bins = spec.nrows() as f32;
    let clamp = |v: f32| if v <= 0.0 { 1e-5 } else { v };

    (0..spec.ncols())
        .map(|n| {
            let prev = spec.column(if n == 0 { 0 } else { n - 1 });
            let diff: f32 = spec
                .column(n)
                .iter()
                .zip(prev.iter())
                .map(|(&a, &b)| (clamp(a) / clamp(b)).log2())
                .sum();
            diff / num_bins
        })
        .collect()
}

/// Computes a smoothed novelty function with picked onset peaks.
///
/// The magnitude spectrogram of the pre-processed signal feeds the selected
/// novelty measure; the result is smoothed with a zero-phase moving average
/// of length 10 and clamped at 0. Peaks are local maxima exceeding an
/// adaptive threshold of half the mean novelty plus a zero-phase moving
/// average over 0.3 s.
///
/// # Arguments
/// * `novelty` - The novelty measure
/// * `x` - Mono audio signal
/// * `f_s` - Sample rate of the audio data
/// * `window` - Optional analysis window; must have length `block_length`
/// * `block_length` - Optional block length (default: 4096)
/// * `hop_length` - Optional hop length (default: 512)
///
/// # Returns
/// Returns `(d, t, peaks)`: the novelty function, the block time stamps, and
/// the block indices of the picked onsets.
pub fn compute_novelty(
    novelty: Novelty,
    x: &[f32],
    f_s: f32,
    window: Option<&Array1<f32>>,
    block_length: Option<usize>,
    hop_length: Option<usize>,
) -> Result<(Array1<f32>, Vec<f32>, Vec<usize>), AudioError> {
    let block_length = block_length.unwrap_or(4096);
    let hop_length = hop_length.unwrap_or(512);

    let (spec, _, t) = compute_spectrogram(
        x,
        f_s,
        window,
        Some(block_length),
        Some(hop_length),
        Some(true),
    )?;

    let raw = match novelty {
        Novelty::Flux => novelty_flux(&spec, f_s),
        Novelty::Laroche => novelty_laroche(&spec, f_s),
        Novelty::Hainsworth => novelty_hainsworth(&spec, f_s),
    };

    let mut d = zero_phase_movavg(&raw, 10);
    d.mapv_inplace(|v| v.max(0.0));

    // Adaptive threshold: half the mean (excluding the first value) plus a
    // 0.3 s moving average.
    let lp_length = ((0.3 * f_s / hop_length as f32).ceil() as usize).max(2);
    let mean = if d.len() > 1 {
        d.slice(ndarray::s![1..]).mean().unwrap_or(0.0)
    } else {
        0.0
    };
    let g_t = zero_phase_movavg(&d, lp_length).mapv(|v| v + 0.5 * mean);

    let excess = &d - &g_t;
    let mut peaks = Vec::new();
    for n in 1..excess.len().saturating_sub(1) {
        if excess[n] > 0.0 && excess[n] > excess[n - 1] && excess[n] > excess[n + 1] {
            peaks.push(n);
        }
    }

    Ok((d, t, peaks))
}

// Forward-backward moving average, which cancels the filter's phase delay.
fn zero_phase_movavg(x: &Array1<f32>, length: usize) -> Array1<f32> {
    let forward = movavg(x.view(), length);
    let mut reversed: Array1<f32> = forward.slice(ndarray::s![..;-1]).to_owned();
    reversed = movavg(reversed.view(), length);
    reversed.slice(ndarray::s![..;-1]).to_owned()
}

fn movavg(x: ndarray::ArrayView1<f32>, length: usize) -> Array1<f32> {
    let len = length.max(1);
    let mut y = Array1::zeros(x.len());
    let mut acc = 0.0f32;
    for n in 0..x.len() {
        acc += x[n];
        if n >= len {
            acc -= x[n - len];
        }
        y[n] = acc / len as f32;
    }
    y
}
