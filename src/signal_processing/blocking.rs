use ndarray::Array2;
use crate::io::core::AudioError;

/// Splits a mono signal into overlapping blocks of `block_length` samples
/// advancing by `hop_length`, zero-padding the tail.
///
/// The number of blocks is `ceil(len / hop_length)`; every block, including
/// the last, is fully populated, so no samples are silently dropped. Time
/// stamps mark block centers: `t[n] = (n*hop + block/2) / f_s`.
///
/// # Arguments
/// * `x` - Input signal
/// * `block_length` - Block length in samples
/// * `hop_length` - Hop length in samples
/// * `f_s` - Sample rate of the audio data
///
/// # Returns
/// Returns the block matrix of shape `(num_blocks, block_length)` and the
/// block-center time stamps in seconds, or `AudioError::InvalidInput` for a
/// zero block or hop length.
pub fn block_audio(
    x: &[f32],
    block_length: usize,
    hop_length: usize,
    f_s: f32,
) -> Result<(Array2<f32>, Vec<f32>), AudioError> {
    if block_length == 0 || hop_length == 0 {
        return Err(AudioError::InvalidInput(
            "block and hop length must be positive".to_string(),
        ));
    }

    let num_blocks = x.len().div_ceil(hop_length);
    let mut blocks = Array2::<f32>::zeros((num_blocks, block_length));
    let mut t = Vec::with_capacity(num_blocks);

    for n in 0..num_blocks {
        let start = n * hop_length;
        let stop = (start + block_length).min(x.len());
        blocks
            .row_mut(n)
            .slice_mut(ndarray::s![..stop - start])
            .assign(&ndarray::ArrayView1::from(&x[start..stop]));
        t.push((start as f32 + block_length as f32 / 2.0) / f_s);
    }

    Ok((blocks, t))
}
