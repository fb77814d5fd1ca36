use ndarray::Array1;
use std::f32::consts::PI;

/// Computes a periodic von-Hann window of the given length.
///
/// `w[k] = 0.5 - 0.5 * cos(2*pi*k / length)`, so `w[0] == 0` and the
/// maximum of 1 sits at `k == length / 2`. The window is periodic, not
/// symmetric: the last sample is not the mirror of the first. A length of
/// zero is a caller error and yields an empty window.
pub fn hann_periodic(window_length: usize) -> Array1<f32> {
    Array1::from_iter(
        (0..window_length)
            .map(|k| 0.5 - 0.5 * (2.0 * PI * k as f32 / window_length as f32).cos()),
    )
}
