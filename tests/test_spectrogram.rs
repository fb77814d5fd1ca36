use aca_rs::{compute_complex_spectrogram, compute_mel_spectrogram, compute_spectrogram};
use approx::assert_abs_diff_eq;
use ndarray::Array1;
use std::f32::consts::PI;

#[test]
fn test_spectrogram_shape_and_axes() {
    let x = vec![0.1f32; 1024];
    let (spec, f, t) = compute_spectrogram(&x, 1024.0, None, Some(256), Some(128), None).unwrap();
    assert_eq!(spec.shape(), &[129, 8]);
    assert_eq!(f.len(), 129);
    assert_abs_diff_eq!(f[0], 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(f[128], 512.0, epsilon = 1e-3);
    assert_eq!(t.len(), 8);
    assert_abs_diff_eq!(t[0], 128.0 / 1024.0, epsilon = 1e-6);
}

#[test]
fn test_spectrogram_sinusoid_amplitude() {
    // full block of a sinusoid exactly on bin 8, rectangular window, no
    // normalization: the magnitude at that bin equals the amplitude
    let f_s = 1024.0;
    let block = 256;
    let x: Vec<f32> = (0..block)
        .map(|n| 0.5 * (2.0 * PI * 32.0 * n as f32 / f_s).sin())
        .collect();
    let window = Array1::ones(block);
    let (spec, _, _) = compute_spectrogram(
        &x,
        f_s,
        Some(&window),
        Some(block),
        Some(block),
        Some(false),
    )
    .unwrap();

    assert_abs_diff_eq!(spec[[8, 0]], 0.5, epsilon = 1e-3);
    assert!(spec[[20, 0]] < 1e-3);
    assert!(spec[[0, 0]] < 1e-3);
}

#[test]
fn test_complex_spectrogram_matches_magnitude() {
    let x: Vec<f32> = (0..2048)
        .map(|n| (2.0 * PI * 100.0 * n as f32 / 8000.0).sin())
        .collect();
    let (mag, _, _) = compute_spectrogram(&x, 8000.0, None, Some(512), Some(256), None).unwrap();
    let (cpx, _, _) =
        compute_complex_spectrogram(&x, 8000.0, None, Some(512), Some(256), None).unwrap();
    assert_eq!(mag.shape(), cpx.shape());
    assert_abs_diff_eq!(mag[[10, 2]], cpx[[10, 2]].norm(), epsilon = 1e-6);
}

#[test]
fn test_spectrogram_rejects_mismatched_window() {
    let x = vec![0.0f32; 512];
    let window = Array1::ones(100);
    assert!(compute_spectrogram(&x, 8000.0, Some(&window), Some(256), Some(128), None).is_err());
}

#[test]
fn test_mel_spectrogram_shape() {
    let x: Vec<f32> = (0..8192)
        .map(|n| (2.0 * PI * 440.0 * n as f32 / 44100.0).sin())
        .collect();
    let (mel, f_c, t) =
        compute_mel_spectrogram(&x, 44100.0, None, None, Some(4096), Some(2048), None, None)
            .unwrap();
    assert_eq!(mel.nrows(), 128);
    assert_eq!(mel.ncols(), t.len());
    assert_eq!(f_c.len(), 128);
    // band centers are ordered
    assert!(f_c.windows(2).all(|w| w[0] < w[1]));
}
