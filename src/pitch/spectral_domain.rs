use ndarray::{Array1, Array2, Axis};

use super::time_domain::argmax;
use crate::features::temporal::normalized_acf;

/// Tracks f0 per spectrum via the maximum of the harmonic product spectrum.
///
/// The HPS multiplies the spectrum with its decimations up to order 4; the
/// maximum is searched above 300 Hz.
pub fn pitch_spectral_hps(spec: &Array2<f32>, f_s: f32) -> Array1<f32> {
    let order = 4;
    let f_min = 300.0;

    let num_bins = spec.nrows();
    let hps_len = (num_bins - 1) / order;
    let k_min = (f_min / f_s * 2.0 * (num_bins - 1) as f32).round() as usize;

    spec.axis_iter(Axis(1))
        .map(|col| {
            let mut hps: Vec<f32> = col.iter().take(hps_len).copied().collect();
            for decimation in 2..=order {
                for (k, h) in hps.iter_mut().enumerate() {
                    *h *= col[k * decimation];
                }
            }
            let k_max = argmax(&hps[k_min.min(hps.len())..]) + k_min;
            k_max as f32 / (num_bins - 1) as f32 * f_s / 2.0
        })
        .collect()
}

/// Tracks f0 per spectrum via the maximum of the spectral autocorrelation.
///
/// The spectrum is mirrored around DC for symmetry and its DC bin replaced by
/// the spectrogram's global maximum before correlation; the maximum is
/// searched above 300 Hz and past the first local ACF peak. Near-silent
/// spectra yield 0.
pub fn pitch_spectral_acf(spec: &Array2<f32>, f_s: f32) -> Array1<f32> {
    let f_min = 300.0;

    let num_bins = spec.nrows();
    let mirror_len = 2 * num_bins;
    let global_max = spec.iter().fold(0.0f32, |acc, &v| acc.max(v));

    spec.axis_iter(Axis(1))
        .map(|col| {
            // Mirrored column: reversed copy followed by the original, with
            // both DC bins lifted to the global maximum.
            let mut mirrored = Vec::with_capacity(mirror_len);
            mirrored.extend(col.iter().rev().copied());
            mirrored.extend(col.iter().copied());
            mirrored[num_bins - 1] = global_max;
            mirrored[num_bins] = global_max;

            if mirrored.iter().sum::<f32>() < 1e-20 {
                return 0.0;
            }

            let r = normalized_acf(&mirrored);
            let mut eta_min =
                ((f_min / f_s * (mirror_len - 2) as f32).round() as usize).saturating_sub(1);
            if let Some(peak) = first_local_peak(&r) {
                eta_min = eta_min.max(peak.saturating_sub(1));
            }

            let lag = argmax(&r[eta_min.min(r.len())..]) + eta_min + 1;
            lag as f32 / (mirror_len - 2) as f32 * f_s
        })
        .collect()
}

fn first_local_peak(r: &[f32]) -> Option<usize> {
    (1..r.len().saturating_sub(1))
        .find(|&i| r[i] > r[i - 1] && r[i] > r[i + 1] && r[i] >= 0.0)
}
