use ndarray::{Array1, Axis};

use crate::features::temporal::normalized_acf;
use crate::io::AudioError;
use crate::signal_processing::block_audio;

/// Tracks f0 per block via the lag of the autocorrelation maximum.
///
/// Lags shorter than the period of 2 kHz are excluded, as is everything up
/// to the first dip of the ACF below 0.35 and up to its first rising slope,
/// to keep the main lobe from masking the fundamental. Silent blocks yield 0.
pub fn pitch_time_acf(
    x: &[f32],
    block_length: usize,
    hop_length: usize,
    f_s: f32,
) -> Result<(Array1<f32>, Vec<f32>), AudioError> {
    let f_max = 2000.0;
    let min_thresh = 0.35;

    let (blocks, t) = block_audio(x, block_length, hop_length, f_s)?;

    let f_0 = blocks
        .axis_iter(Axis(0))
        .map(|block| {
            let r = normalized_acf(&block.to_vec());
            if r.is_empty() {
                return 0.0;
            }

            let mut eta_min = (f_s / f_max).floor() as usize;
            if let Some(dip) = r.iter().position(|&v| v < min_thresh) {
                eta_min = eta_min.max(dip);
            }
            if let Some(rise) = r.windows(2).position(|w| w[1] > w[0]) {
                eta_min = eta_min.max(rise);
            }

            let offset = argmax(&r[(eta_min + 1).min(r.len())..]);
            // r[i] holds the coefficient at lag i + 1.
            f_s / (offset + eta_min + 2) as f32
        })
        .collect();

    Ok((f_0, t))
}

/// Tracks f0 per block via the lag of the average magnitude difference
/// function (AMDF) minimum.
///
/// The search spans lags from the period of 2 kHz down to the period of
/// 50 Hz. Silent blocks yield 0.
pub fn pitch_time_amdf(
    x: &[f32],
    block_length: usize,
    hop_length: usize,
    f_s: f32,
) -> Result<(Array1<f32>, Vec<f32>), AudioError> {
    let f_max = 2000.0;
    let f_min = 50.0;

    let (blocks, t) = block_audio(x, block_length, hop_length, f_s)?;

    let eta_min = (f_s / f_max).floor() as usize;
    let eta_max = (f_s / f_min).floor() as usize;

    let f_0 = blocks
        .axis_iter(Axis(0))
        .map(|block| {
            if block.iter().all(|&v| v == 0.0) {
                return 0.0;
            }
            let d = amdf(&block.to_vec(), eta_max);
            let start = (eta_min + 1).min(d.len());
            if d.len() == start {
                return 0.0;
            }
            let offset = argmin(&d[start..]);
            // d[i] holds the difference at lag i + 1.
            f_s / (offset + eta_min + 2) as f32
        })
        .collect();

    Ok((f_0, t))
}

/// Tracks f0 per block from the mean distance between zero crossings.
///
/// A crossing sits between two samples whose product is negative; the
/// fundamental period is twice the mean crossing distance. Blocks with
/// fewer than two crossings yield 0.
pub fn pitch_time_zero_crossings(
    x: &[f32],
    block_length: usize,
    hop_length: usize,
    f_s: f32,
) -> Result<(Array1<f32>, Vec<f32>), AudioError> {
    let (blocks, t) = block_audio(x, block_length, hop_length, f_s)?;

    let f_0 = blocks
        .axis_iter(Axis(0))
        .map(|block| {
            let crossings: Vec<usize> = block
                .iter()
                .zip(block.iter().skip(1))
                .enumerate()
                .filter(|&(_, (&a, &b))| a * b < 0.0)
                .map(|(i, _)| i)
                .collect();
            if crossings.len() < 2 {
                return 0.0;
            }
            let mean_dist = crossings
                .windows(2)
                .map(|w| (w[1] - w[0]) as f32)
                .sum::<f32>()
                / (crossings.len() - 1) as f32;
            f_s / (2.0 * mean_dist)
        })
        .collect();

    Ok((f_0, t))
}

fn amdf(x: &[f32], eta_max: usize) -> Vec<f32> {
    let len = x.len();
    let mut d = vec![1.0f32; len];
    for eta in 0..len.min(eta_max + 1) {
        d[eta] = x
            .iter()
            .take(len - 1 - eta)
            .zip(x.iter().skip(eta + 1))
            .map(|(&a, &b)| (a - b).abs())
            .sum::<f32>()
            / len as f32;
    }
    d
}

pub(super) fn argmax(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0usize, f32::NEG_INFINITY), |(bi, bv), (i, &v)| {
            if v > bv { (i, v) } else { (bi, bv) }
        })
        .0
}

fn argmin(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0usize, f32::INFINITY), |(bi, bv), (i, &v)| {
            if v < bv { (i, v) } else { (bi, bv) }
        })
        .0
}
