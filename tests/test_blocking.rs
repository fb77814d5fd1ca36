use aca_rs::{block_audio, hann_periodic};
use approx::assert_abs_diff_eq;

#[test]
fn test_block_count_and_shape() {
    let x = vec![0.0f32; 1000];
    let (blocks, t) = block_audio(&x, 256, 128, 1000.0).unwrap();
    // ceil(1000 / 128) = 8
    assert_eq!(blocks.shape(), &[8, 256]);
    assert_eq!(t.len(), 8);
}

#[test]
fn test_block_content_and_padding() {
    let x: Vec<f32> = (0..10).map(|i| i as f32).collect();
    let (blocks, _) = block_audio(&x, 4, 3, 10.0).unwrap();
    assert_eq!(blocks.shape(), &[4, 4]);
    assert_eq!(blocks[[0, 0]], 0.0);
    assert_eq!(blocks[[0, 3]], 3.0);
    assert_eq!(blocks[[1, 0]], 3.0);
    // last block starts at sample 9 and is zero-padded
    assert_eq!(blocks[[3, 0]], 9.0);
    assert_eq!(blocks[[3, 1]], 0.0);
    assert_eq!(blocks[[3, 3]], 0.0);
}

#[test]
fn test_block_timestamps_are_block_centers() {
    let x = vec![0.0f32; 1024];
    let (_, t) = block_audio(&x, 256, 128, 1024.0).unwrap();
    assert_abs_diff_eq!(t[0], 128.0 / 1024.0, epsilon = 1e-6);
    assert_abs_diff_eq!(t[1], (128.0 + 128.0) / 1024.0, epsilon = 1e-6);
}

#[test]
fn test_block_rejects_zero_lengths() {
    let x = vec![0.0f32; 16];
    assert!(block_audio(&x, 0, 4, 100.0).is_err());
    assert!(block_audio(&x, 8, 0, 100.0).is_err());
}

#[test]
fn test_hann_window() {
    let w = hann_periodic(8);
    assert_eq!(w.len(), 8);
    assert_abs_diff_eq!(w[0], 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(w[4], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(w[2], 0.5, epsilon = 1e-6);
    // periodic: w[8] would wrap to 0, so w[7] != 0
    assert!(w[7] > 0.0);
}
