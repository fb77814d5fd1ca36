use ndarray::{Array1, Array2, Axis};

use crate::features::filterbank::{dct_matrix, mfcc_filterbank, pitch_chroma_filters};

// All spectral descriptors operate on a one-sided magnitude spectrogram of
// shape (K, N) with K = block_length/2 + 1 bins and one column per block;
// a single spectrum is a (K, 1) matrix. A zero normalizer is substituted by
// 1 so that degenerate (all-zero) columns yield 0 instead of NaN.

/// Spectral centroid in Hz: the magnitude-weighted mean frequency per column.
pub fn spectral_centroid(spec: &Array2<f32>, f_s: f32) -> Array1<f32> {
    let num_bins = spec.nrows();
    spec.axis_iter(Axis(1))
        .map(|col| {
            let norm = zero_guard(col.sum());
            let centroid: f32 = col
                .iter()
                .enumerate()
                .map(|(k, &v)| k as f32 * v)
                .sum::<f32>()
                / norm;
            index_to_hz(centroid, num_bins, f_s)
        })
        .collect()
}

/// Spectral spread in Hz: the magnitude-weighted standard deviation around
/// the centroid per column.
pub fn spectral_spread(spec: &Array2<f32>, f_s: f32) -> Array1<f32> {
    let num_bins = spec.nrows();
    let centroid = spectral_centroid(spec, f_s);

    spec.axis_iter(Axis(1))
        .zip(centroid.iter())
        .map(|(col, &c_hz)| {
            let c_idx = hz_to_index(c_hz, num_bins, f_s);
            let norm = zero_guard(col.sum());
            let spread: f32 = col
                .iter()
                .enumerate()
                .map(|(k, &v)| (k as f32 - c_idx).powi(2) * v)
                .sum::<f32>()
                / norm;
            index_to_hz(spread.sqrt(), num_bins, f_s)
        })
        .collect()
}

/// Spectral skewness: the third standardized moment of the magnitude
/// distribution around the centroid.
pub fn spectral_skewness(spec: &Array2<f32>, f_s: f32) -> Array1<f32> {
    standardized_moment(spec, f_s, 3)
}

/// Spectral kurtosis: the fourth standardized moment of the magnitude
/// distribution, reported as excess kurtosis (raw value minus 3).
pub fn spectral_kurtosis(spec: &Array2<f32>, f_s: f32) -> Array1<f32> {
    standardized_moment(spec, f_s, 4).mapv(|v| v - 3.0)
}

fn standardized_moment(spec: &Array2<f32>, f_s: f32, order: i32) -> Array1<f32> {
    let num_bins = spec.nrows();
    let centroid = spectral_centroid(spec, f_s);
    let spread = spectral_spread(spec, f_s);

    spec.axis_iter(Axis(1))
        .zip(centroid.iter().zip(spread.iter()))
        .map(|(col, (&c_hz, &s_hz))| {
            let c_idx = hz_to_index(c_hz, num_bins, f_s);
            let s_idx = zero_guard(hz_to_index(s_hz, num_bins, f_s));
            let norm = zero_guard(col.sum());
            col.iter()
                .enumerate()
                .map(|(k, &v)| (k as f32 - c_idx).powi(order) * v)
                .sum::<f32>()
                / (s_idx.powi(order) * norm)
        })
        .collect()
}

/// Spectral flux: the Euclidean distance between consecutive magnitude
/// spectra divided by the number of bins. The first column's predecessor is
/// itself, so the first flux value is 0.
pub fn spectral_flux(spec: &Array2<f32>, _f_s: f32) -> Array1<f32> {
    let num_bins = spec.nrows() as f32;
    let num_blocks = spec.ncols();

    let mut flux = Array1::zeros(num_blocks);
    for n in 0..num_blocks {
        let prev = spec.column(if n == 0 { 0 } else { n - 1 });
        let diff: f32 = spec
            .column(n)
            .iter()
            .zip(prev.iter())
            .map(|(&a, &b)| (a - b).powi(2))
            .sum();
        flux[n] = diff.sqrt() / num_bins;
    }
    flux
}

/// Spectral crest factor: maximum over sum of the magnitudes per column.
pub fn spectral_crest_factor(spec: &Array2<f32>, _f_s: f32) -> Array1<f32> {
    spec.axis_iter(Axis(1))
        .map(|col| {
            let norm = zero_guard(col.sum());
            col.iter().fold(0.0f32, |acc, &v| acc.max(v)) / norm
        })
        .collect()
}

/// Spectral flatness: geometric over arithmetic mean of the magnitudes per
/// column. Any exactly-zero bin forces the flatness to 0.
pub fn spectral_flatness(spec: &Array2<f32>, _f_s: f32) -> Array1<f32> {
    let num_bins = spec.nrows() as f32;
    spec.axis_iter(Axis(1))
        .map(|col| {
            if col.iter().any(|&v| v == 0.0) {
                return 0.0;
            }
            let norm = zero_guard(col.sum() / num_bins);
            let log_mean = col.iter().map(|&v| (v + 1e-20).ln()).sum::<f32>() / num_bins;
            log_mean.exp() / norm
        })
        .collect()
}

/// Spectral decrease: the weighted average of the magnitude's decrease
/// relative to the first bin, `sum((X[k] - X[0]) / k) / sum(X[1..])`.
pub fn spectral_decrease(spec: &Array2<f32>, _f_s: f32) -> Array1<f32> {
    spec.axis_iter(Axis(1))
        .map(|col| {
            let norm = zero_guard(col.iter().skip(1).sum());
            let x0 = col[0];
            col.iter()
                .enumerate()
                .skip(1)
                .map(|(k, &v)| (v - x0) / k as f32)
                .sum::<f32>()
                / norm
        })
        .collect()
}

/// Spectral slope: the least-squares slope of the magnitude over the
/// centered bin index.
pub fn spectral_slope(spec: &Array2<f32>, _f_s: f32) -> Array1<f32> {
    let num_bins = spec.nrows();
    let k_centered: Vec<f32> = (0..num_bins)
        .map(|k| k as f32 - num_bins as f32 / 2.0)
        .collect();
    let k_var: f32 = k_centered.iter().map(|&k| k * k).sum();

    spec.axis_iter(Axis(1))
        .map(|col| {
            let mean = col.sum() / num_bins as f32;
            col.iter()
                .zip(k_centered.iter())
                .map(|(&v, &k)| k * (v - mean))
                .sum::<f32>()
                / k_var
        })
        .collect()
}

/// Spectral rolloff in Hz: the lowest bin below which `kappa` (default 0.85)
/// of the cumulative magnitude is concentrated.
pub fn spectral_rolloff(spec: &Array2<f32>, f_s: f32, kappa: Option<f32>) -> Array1<f32> {
    let kappa = kappa.unwrap_or(0.85);
    let num_bins = spec.nrows();

    spec.axis_iter(Axis(1))
        .map(|col| {
            let norm = zero_guard(col.sum());
            let mut cum = 0.0;
            let mut rolloff = 0usize;
            for (k, &v) in col.iter().enumerate() {
                cum += v / norm;
                if cum >= kappa {
                    rolloff = k;
                    break;
                }
            }
            index_to_hz(rolloff as f32, num_bins, f_s)
        })
        .collect()
}

/// Tonal power ratio: energy at local spectral maxima above the absolute
/// threshold `g_t` (default 5e-4) over the total energy per column. Columns
/// whose total energy falls below the threshold, or without any peak, yield 0.
pub fn spectral_tonal_power_ratio(
    spec: &Array2<f32>,
    _f_s: f32,
    g_t: Option<f32>,
) -> Array1<f32> {
    let g_t = g_t.unwrap_or(5e-4);

    spec.axis_iter(Axis(1))
        .map(|col| {
            let power: Vec<f32> = col.iter().map(|&v| v * v).collect();
            let total: f32 = power.iter().sum();
            if total < g_t {
                return 0.0;
            }
            let mut peak_sum = 0.0;
            for k in 1..power.len().saturating_sub(1) {
                if power[k] > power[k - 1] && power[k] > power[k + 1] && power[k] >= g_t {
                    peak_sum += power[k];
                }
            }
            if peak_sum == 0.0 { 0.0 } else { peak_sum / total }
        })
        .collect()
}

/// Mel frequency cepstral coefficients: mel filter bank on the magnitude
/// spectrogram, `log10`, then a type-II DCT keeping the first `num_coeffs`
/// (default 13) coefficients.
pub fn spectral_mfccs(spec: &Array2<f32>, f_s: f32, num_coeffs: Option<usize>) -> Array2<f32> {
    let num_coeffs = num_coeffs.unwrap_or(13);
    let h = mfcc_filterbank(spec.nrows(), f_s);
    let t = dct_matrix(h.nrows(), num_coeffs);

    let mel = h.dot(spec).mapv(|v| (v + 1e-20).log10());
    t.dot(&mel)
}

/// Pitch chroma: the squared magnitudes projected onto 12 pitch classes
/// across up to 4 octaves from middle C, each column normalized to sum 1.
pub fn spectral_pitch_chroma(spec: &Array2<f32>, f_s: f32) -> Array2<f32> {
    let h = pitch_chroma_filters(spec.nrows(), f_s);
    let mut chroma = h.dot(&spec.mapv(|v| v * v));

    for mut col in chroma.axis_iter_mut(Axis(1)) {
        let norm = zero_guard(col.sum());
        col.mapv_inplace(|v| v / norm);
    }
    chroma
}

#[inline]
fn zero_guard(norm: f32) -> f32 {
    if norm == 0.0 { 1.0 } else { norm }
}

#[inline]
fn index_to_hz(index: f32, num_bins: usize, f_s: f32) -> f32 {
    index / (num_bins - 1) as f32 * f_s / 2.0
}

#[inline]
fn hz_to_index(hz: f32, num_bins: usize, f_s: f32) -> f32 {
    hz * 2.0 / f_s * (num_bins - 1) as f32
}
