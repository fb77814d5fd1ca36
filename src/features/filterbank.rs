use ndarray::Array2;

use crate::utils::conversion::{MelModel, hz_to_mel, mel_to_hz};

/// Builds the 40-band MFCC filter bank (13 linearly and 27 logarithmically
/// spaced triangular bands, Slaney-style) for a one-sided spectrum of
/// `num_bins` bins.
///
/// Bands that would exceed the Nyquist frequency are dropped, so the output
/// can have fewer than 40 rows for very low sample rates.
pub fn mfcc_filterbank(num_bins: usize, f_s: f32) -> Array2<f32> {
    let f_start = 133.3333f32;
    let num_lin_filters = 13usize;
    let num_log_filters = 27usize;
    let linear_spacing = 66.66666666f32;
    let log_spacing = 1.0711703f32;

    let mut num_filters = num_lin_filters + num_log_filters;

    let mut f = Vec::with_capacity(num_filters + 2);
    for i in 0..num_lin_filters {
        f.push(f_start + i as f32 * linear_spacing);
    }
    let log_base = f[num_lin_filters - 1];
    for i in 1..=(num_log_filters + 2) {
        f.push(log_base * log_spacing.powi(i as i32));
    }

    if f[num_lin_filters - 1] >= f_s / 2.0 {
        f.retain(|&v| v < f_s / 2.0);
        num_filters = f.len().saturating_sub(2);
    }

    let f_l = &f[0..num_filters];
    let f_c = &f[1..num_filters + 1];
    let f_u = &f[2..num_filters + 2];

    let f_k: Vec<f32> = (0..num_bins)
        .map(|k| k as f32 / (num_bins - 1) as f32 * f_s / 2.0)
        .collect();

    // first index where the predicate holds, 0 otherwise (numpy argmax on bools)
    let first_idx = |pred: &dyn Fn(f32) -> bool| -> isize {
        f_k.iter().position(|&v| pred(v)).unwrap_or(0) as isize
    };

    let mut h = Array2::<f32>::zeros((num_filters, num_bins));
    for c in 0..num_filters {
        let filter_max = 2.0 / (f_u[c] - f_l[c]);

        let i_l = first_idx(&|v| v > f_l[c]);
        let i_u = (first_idx(&|v| v > f_c[c]) - 1).max(0);
        for k in i_l as usize..=i_u as usize {
            h[[c, k]] = filter_max * (f_k[k] - f_l[c]) / (f_c[c] - f_l[c]);
        }

        let i_l = i_u + 1;
        let i_u = (first_idx(&|v| v >= f_u[c]) - 1).max(0);
        for k in i_l as usize..=i_u as usize {
            h[[c, k]] = filter_max * (f_u[c] - f_k[k]) / (f_u[c] - f_c[c]);
        }
    }

    h
}

/// Builds the type-II DCT matrix used to decorrelate the log mel energies.
///
/// `T[i, j] = cos(i * (2j+1) * pi / (2*num_bands)) / sqrt(num_bands/2)`, with
/// the first row additionally divided by `sqrt(2)`.
pub fn dct_matrix(num_bands: usize, num_coeffs: usize) -> Array2<f32> {
    let mut t = Array2::<f32>::zeros((num_coeffs, num_bands));
    let scale = 1.0 / (num_bands as f32 / 2.0).sqrt();
    for i in 0..num_coeffs {
        for j in 0..num_bands {
            t[[i, j]] = (i as f32 * (2.0 * j as f32 + 1.0) * std::f32::consts::PI
                / (2.0 * num_bands as f32))
                .cos()
                * scale;
        }
    }
    for j in 0..num_bands {
        t[[0, j]] /= std::f32::consts::SQRT_2;
    }
    t
}

/// Builds the 12-class pitch chroma weighting matrix for a one-sided spectrum
/// of `num_bins` bins.
///
/// Each pitch class collects up to 4 octaves starting at middle C
/// (261.63 Hz); octaves above Nyquist are dropped. Within each octave band
/// (a semitone wide around the class frequency) every bin carries the same
/// weight `1 / (band_width + 1)`.
pub fn pitch_chroma_filters(num_bins: usize, f_s: f32) -> Array2<f32> {
    let num_pitches = 12usize;
    let mut f_mid = 261.63f32;

    let mut num_octaves = 4i32;
    while num_octaves > 0 && f_mid * 2.0f32.powi(num_octaves) > f_s / 2.0 {
        num_octaves -= 1;
    }

    let mut h = Array2::<f32>::zeros((num_pitches, num_bins));
    let quartertone_down = 2.0f32.powf(-1.0 / (2.0 * num_pitches as f32));
    let quartertone_up = 2.0f32.powf(1.0 / (2.0 * num_pitches as f32));

    for i in 0..num_pitches {
        let bound_l = quartertone_down * f_mid * 2.0 * (num_bins - 1) as f32 / f_s;
        let bound_u = quartertone_up * f_mid * 2.0 * (num_bins - 1) as f32 / f_s;
        for j in 0..num_octaves {
            let scale = 2.0f32.powi(j);
            let k_l = (scale * bound_l).ceil() as usize;
            let k_u = (scale * bound_u).ceil() as usize;
            let weight = 1.0 / (k_u - k_l + 1) as f32;
            for k in k_l..k_u.min(num_bins) {
                h[[i, k]] = weight;
            }
        }
        f_mid *= 2.0f32.powf(1.0 / num_pitches as f32);
    }

    h
}

/// Builds a triangular mel filter bank for a one-sided spectrum of `num_bins`
/// bins, with band edges equally spaced on the Fant mel scale between 0 Hz
/// and `f_max`.
///
/// # Returns
/// Returns the filter matrix of shape `(num_filters, num_bins)` and the band
/// center frequencies in Hz.
pub fn mel_filterbank(
    num_bins: usize,
    f_s: f32,
    num_filters: usize,
    f_max: f32,
) -> (Array2<f32>, Vec<f32>) {
    let f_max = f_max.min(f_s / 2.0);
    let f_fft: Vec<f32> = (0..num_bins)
        .map(|k| k as f32 / (num_bins - 1) as f32 * f_s / 2.0)
        .collect();

    let mel_min = hz_to_mel(0.0, MelModel::Fant);
    let mel_max = hz_to_mel(f_max, MelModel::Fant);
    let f_mel: Vec<f32> = (0..num_filters + 2)
        .map(|i| {
            let mel = mel_min + i as f32 * (mel_max - mel_min) / (num_filters + 1) as f32;
            mel_to_hz(mel, MelModel::Fant)
        })
        .collect();

    let f_l = &f_mel[0..num_filters];
    let f_c = &f_mel[1..num_filters + 1];
    let f_u = &f_mel[2..num_filters + 2];

    let mut h = Array2::<f32>::zeros((num_filters, num_bins));
    for c in 0..num_filters {
        let filter_max = 2.0 / (f_u[c] - f_l[c]);
        for (k, &fk) in f_fft.iter().enumerate() {
            if fk > f_l[c] && fk <= f_c[c] {
                h[[c, k]] = filter_max * (fk - f_l[c]) / (f_c[c] - f_l[c]);
            } else if fk > f_c[c] && fk < f_u[c] {
                h[[c, k]] = filter_max * (f_u[c] - fk) / (f_u[c] - f_c[c]);
            }
        }
    }

    (h, f_c.to_vec())
}
