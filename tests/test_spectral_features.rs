use aca_rs::{
    spectral_centroid, spectral_crest_factor, spectral_decrease, spectral_flatness,
    spectral_flux, spectral_kurtosis, spectral_mfccs, spectral_pitch_chroma, spectral_rolloff,
    spectral_skewness, spectral_slope, spectral_spread, spectral_tonal_power_ratio,
};
use approx::assert_abs_diff_eq;
use ndarray::{Array2, Axis};

fn flat_spectrum(num_bins: usize) -> Array2<f32> {
    Array2::ones((num_bins, 1))
}

fn delta_spectrum(num_bins: usize, bin: usize) -> Array2<f32> {
    let mut spec = Array2::zeros((num_bins, 1));
    spec[[bin, 0]] = 1.0;
    spec
}

#[test]
fn test_centroid() {
    // flat magnitude: centroid sits at half Nyquist
    let c = spectral_centroid(&flat_spectrum(1025), 4.0);
    assert_abs_diff_eq!(c[0], 1.0, epsilon = 1e-4);

    // single non-zero bin: centroid sits on that bin
    let c = spectral_centroid(&delta_spectrum(1025, 512), 4.0);
    assert_abs_diff_eq!(c[0], 1.0, epsilon = 1e-6);

    // all-zero spectrum yields 0, not NaN
    let c = spectral_centroid(&Array2::zeros((1025, 1)), 4.0);
    assert_eq!(c[0], 0.0);
}

#[test]
fn test_spread() {
    let s = spectral_spread(&delta_spectrum(1025, 512), 4.0);
    assert_abs_diff_eq!(s[0], 0.0, epsilon = 1e-6);

    let s = spectral_spread(&flat_spectrum(1025), 4.0);
    assert!(s[0] > 0.0);
}

#[test]
fn test_skewness_and_kurtosis() {
    // the flat magnitude distribution is symmetric
    let sk = spectral_skewness(&flat_spectrum(1025), 44100.0);
    assert_abs_diff_eq!(sk[0], 0.0, epsilon = 1e-3);

    // excess kurtosis of a uniform distribution is -1.2
    let ku = spectral_kurtosis(&flat_spectrum(1025), 44100.0);
    assert_abs_diff_eq!(ku[0], -1.2, epsilon = 1e-2);

    let sk = spectral_skewness(&Array2::zeros((1025, 1)), 44100.0);
    assert_eq!(sk[0], 0.0);
}

#[test]
fn test_flux() {
    // constant spectrogram: no flux anywhere
    let spec = Array2::ones((17, 4));
    let flux = spectral_flux(&spec, 44100.0);
    for &v in flux.iter() {
        assert_abs_diff_eq!(v, 0.0, epsilon = 1e-6);
    }

    // zeros to ones over 5 bins: sqrt(5) / 5
    let mut spec = Array2::zeros((5, 2));
    spec.column_mut(1).fill(1.0);
    let flux = spectral_flux(&spec, 44100.0);
    assert_abs_diff_eq!(flux[0], 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(flux[1], 5.0f32.sqrt() / 5.0, epsilon = 1e-6);
}

#[test]
fn test_crest_factor() {
    let crest = spectral_crest_factor(&flat_spectrum(16), 44100.0);
    assert_abs_diff_eq!(crest[0], 1.0 / 16.0, epsilon = 1e-6);

    let crest = spectral_crest_factor(&delta_spectrum(16, 5), 44100.0);
    assert_abs_diff_eq!(crest[0], 1.0, epsilon = 1e-6);
}

#[test]
fn test_flatness() {
    let flatness = spectral_flatness(&flat_spectrum(16), 44100.0);
    assert_abs_diff_eq!(flatness[0], 1.0, epsilon = 1e-4);

    // any zero bin collapses the geometric mean
    let flatness = spectral_flatness(&delta_spectrum(16, 5), 44100.0);
    assert_abs_diff_eq!(flatness[0], 0.0, epsilon = 1e-6);
}

#[test]
fn test_decrease() {
    let decrease = spectral_decrease(&delta_spectrum(1025, 512), 44100.0);
    assert_abs_diff_eq!(decrease[0], 1.0 / 512.0, epsilon = 1e-6);

    let decrease = spectral_decrease(&flat_spectrum(1025), 44100.0);
    assert_abs_diff_eq!(decrease[0], 0.0, epsilon = 1e-6);
}

#[test]
fn test_slope() {
    let slope = spectral_slope(&flat_spectrum(64), 44100.0);
    assert_abs_diff_eq!(slope[0], 0.0, epsilon = 1e-6);

    // magnitude rising linearly with the bin index: slope 1
    let ramp = Array2::from_shape_fn((64, 1), |(k, _)| k as f32);
    let slope = spectral_slope(&ramp, 44100.0);
    assert_abs_diff_eq!(slope[0], 1.0, epsilon = 1e-2);
}

#[test]
fn test_rolloff() {
    // flat over 5 bins at kappa 0.85: the 5th bin (Nyquist) closes the gap
    let rolloff = spectral_rolloff(&flat_spectrum(5), 8.0, None);
    assert_abs_diff_eq!(rolloff[0], 4.0, epsilon = 1e-6);

    let rolloff = spectral_rolloff(&flat_spectrum(5), 8.0, Some(0.2));
    assert_abs_diff_eq!(rolloff[0], 0.0, epsilon = 1e-6);
}

#[test]
fn test_tonal_power_ratio() {
    let ratio = spectral_tonal_power_ratio(&delta_spectrum(5, 2), 44100.0, None);
    assert_abs_diff_eq!(ratio[0], 1.0, epsilon = 1e-6);

    let ratio = spectral_tonal_power_ratio(&Array2::zeros((5, 1)), 44100.0, None);
    assert_eq!(ratio[0], 0.0);

    // flat spectrum has no local maxima
    let ratio = spectral_tonal_power_ratio(&flat_spectrum(5), 44100.0, None);
    assert_eq!(ratio[0], 0.0);
}

#[test]
fn test_mfcc_shape() {
    let spec = Array2::ones((1025, 3));
    let mfcc = spectral_mfccs(&spec, 44100.0, None);
    assert_eq!(mfcc.shape(), &[13, 3]);
    for v in mfcc.iter() {
        assert!(v.is_finite());
    }

    let mfcc = spectral_mfccs(&spec, 44100.0, Some(20));
    assert_eq!(mfcc.nrows(), 20);
}

#[test]
fn test_pitch_chroma() {
    let spec = Array2::ones((1025, 3));
    let chroma = spectral_pitch_chroma(&spec, 44100.0);
    assert_eq!(chroma.shape(), &[12, 3]);
    // each column is normalized to a sum of 1
    for col in chroma.axis_iter(Axis(1)) {
        assert_abs_diff_eq!(col.sum(), 1.0, epsilon = 1e-4);
    }
}
