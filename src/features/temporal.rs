use ndarray::{Array1, Array2, Axis};

use crate::io::AudioError;
use crate::signal_processing::block_audio;

// The time-domain descriptors block the raw samples internally and return
// one value per block together with the block-center timestamps.

/// Root mean square of each block in dBFS, floored at -100 dB.
pub fn time_rms(
    x: &[f32],
    block_length: Option<usize>,
    hop_length: Option<usize>,
    f_s: f32,
) -> Result<(Array1<f32>, Vec<f32>), AudioError> {
    let (blocks, t) = block_signal(x, block_length, hop_length, f_s)?;

    let rms = blocks
        .axis_iter(Axis(0))
        .map(|block| {
            let mean_sq = block.iter().map(|&v| v * v).sum::<f32>() / block.len() as f32;
            20.0 * mean_sq.sqrt().max(1e-5).log10()
        })
        .collect();
    Ok((rms, t))
}

/// Zero crossing rate of each block: half the mean absolute sign difference
/// over the `block_length - 1` consecutive sample pairs. Exact zeros carry
/// sign 0, so an alternating block yields exactly 1.
pub fn time_zero_crossing_rate(
    x: &[f32],
    block_length: Option<usize>,
    hop_length: Option<usize>,
    f_s: f32,
) -> Result<(Array1<f32>, Vec<f32>), AudioError> {
    let (blocks, t) = block_signal(x, block_length, hop_length, f_s)?;

    let zcr = blocks
        .axis_iter(Axis(0))
        .map(|block| {
            if block.len() < 2 {
                return 0.0;
            }
            let crossings: f32 = block
                .iter()
                .zip(block.iter().skip(1))
                .map(|(&a, &b)| (sign(b) - sign(a)).abs())
                .sum();
            crossings / (2.0 * (block.len() - 1) as f32)
        })
        .collect();
    Ok((zcr, t))
}

/// Standard deviation of each block around its own mean.
pub fn time_std(
    x: &[f32],
    block_length: Option<usize>,
    hop_length: Option<usize>,
    f_s: f32,
) -> Result<(Array1<f32>, Vec<f32>), AudioError> {
    let (blocks, t) = block_signal(x, block_length, hop_length, f_s)?;

    let std = blocks
        .axis_iter(Axis(0))
        .map(|block| {
            let len = block.len() as f32;
            let mean = block.sum() / len;
            (block.iter().map(|&v| (v - mean).powi(2)).sum::<f32>() / len).sqrt()
        })
        .collect();
    Ok((std, t))
}

/// Peak envelope of each block in dBFS: row 0 is the per-block absolute
/// maximum, row 1 the output of a smoothed peak follower (10 ms attack,
/// 1.5 s release). Both rows are floored at -100 dB.
pub fn time_peak_envelope(
    x: &[f32],
    block_length: Option<usize>,
    hop_length: Option<usize>,
    f_s: f32,
) -> Result<(Array2<f32>, Vec<f32>), AudioError> {
    let hop = hop_length.unwrap_or(512);
    let (blocks, t) = block_signal(x, block_length, Some(hop), f_s)?;
    let num_blocks = blocks.nrows();

    let alpha_at = 1.0 - (-2.2 / (f_s * 0.01)).exp();
    let alpha_rt = 1.0 - (-2.2 / (f_s * 1.5)).exp();

    let mut env = Array2::zeros((2, num_blocks));
    let mut v_prev = 0.0f32;
    for (n, block) in blocks.axis_iter(Axis(0)).enumerate() {
        let peak = block.iter().fold(0.0f32, |acc, &v| acc.max(v.abs()));
        env[[0, n]] = 20.0 * peak.max(1e-5).log10();

        // The follower is advanced over the whole block but only the state
        // at the hop boundary seeds the next block.
        let mut v_tmp = v_prev;
        let mut v_out = 0.0f32;
        for (i, &sample) in block.iter().enumerate() {
            let rect = sample.abs();
            if v_tmp > rect {
                v_tmp *= 1.0 - alpha_rt;
            } else {
                v_tmp += alpha_at * (rect - v_tmp);
            }
            if i + 1 == hop {
                v_prev = v_tmp;
            }
            v_out = v_out.max(v_tmp);
        }
        if hop > block.len() {
            v_prev = v_tmp;
        }
        env[[1, n]] = 20.0 * v_out.max(1e-5).log10();
    }
    Ok((env, t))
}

/// Autocorrelation coefficient at lag `eta + 1` samples (default `eta` 19)
/// of the normalized block autocorrelation.
pub fn time_acf_coeff(
    x: &[f32],
    block_length: Option<usize>,
    hop_length: Option<usize>,
    f_s: f32,
    eta: Option<usize>,
) -> Result<(Array1<f32>, Vec<f32>), AudioError> {
    let eta = eta.unwrap_or(19);
    let (blocks, t) = block_signal(x, block_length, hop_length, f_s)?;

    let acf = blocks
        .axis_iter(Axis(0))
        .map(|block| {
            let r = normalized_acf(&block.to_vec());
            r.get(eta).copied().unwrap_or(0.0)
        })
        .collect();
    Ok((acf, t))
}

/// Maximum of the normalized block autocorrelation above the lag
/// corresponding to `f_max` (default 2000 Hz), restricted to lags past the
/// ACF's first dip below 0.35 and past its first rising slope.
pub fn time_max_acf(
    x: &[f32],
    block_length: Option<usize>,
    hop_length: Option<usize>,
    f_s: f32,
    f_max: Option<f32>,
    min_thresh: Option<f32>,
) -> Result<(Array1<f32>, Vec<f32>), AudioError> {
    let f_max = f_max.unwrap_or(2000.0);
    let min_thresh = min_thresh.unwrap_or(0.35);
    let (blocks, t) = block_signal(x, block_length, hop_length, f_s)?;

    let max_acf = blocks
        .axis_iter(Axis(0))
        .map(|block| {
            let r = normalized_acf(&block.to_vec());
            if r.is_empty() {
                return 0.0;
            }
            // Ignore lags shorter than the period of f_max, and everything
            // up to the main lobe's decay below the threshold and its first
            // rising slope.
            let mut eta_min = (f_s / f_max).floor() as usize;
            if let Some(dip) = r.iter().position(|&v| v < min_thresh) {
                eta_min = eta_min.max(dip);
            }
            if let Some(rise) = r.windows(2).position(|w| w[1] > w[0]) {
                eta_min = eta_min.max(rise);
            }
            // the maximum may legitimately be negative
            r.iter()
                .skip(eta_min + 1)
                .copied()
                .reduce(f32::max)
                .unwrap_or(0.0)
        })
        .collect();
    Ok((max_acf, t))
}

/// Positive-lag autocorrelation normalized by the block energy, so that
/// `r[i]` is the coefficient at lag `i + 1`. Returns an empty vector for an
/// all-zero block.
pub(crate) fn normalized_acf(x: &[f32]) -> Vec<f32> {
    let energy: f32 = x.iter().map(|&v| v * v).sum();
    if energy == 0.0 {
        return Vec::new();
    }
    (1..x.len())
        .map(|lag| {
            x.iter()
                .zip(x.iter().skip(lag))
                .map(|(&a, &b)| a * b)
                .sum::<f32>()
                / energy
        })
        .collect()
}

fn block_signal(
    x: &[f32],
    block_length: Option<usize>,
    hop_length: Option<usize>,
    f_s: f32,
) -> Result<(Array2<f32>, Vec<f32>), AudioError> {
    block_audio(
        x,
        block_length.unwrap_or(1024),
        hop_length.unwrap_or(512),
        f_s,
    )
}

#[inline]
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
