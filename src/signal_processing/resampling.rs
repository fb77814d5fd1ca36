use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResampleError {
    #[error("Resampling failed: {0}")]
    RubatoError(String),
}

/// Resamples a mono signal from `orig_sr` to `target_sr` with a windowed-sinc
/// interpolator.
pub fn resample(samples: &[f32], orig_sr: u32, target_sr: u32) -> Result<Vec<f32>, ResampleError> {
    if orig_sr == target_sr || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = target_sr as f64 / orig_sr as f64;

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        oversampling_factor: 256,
        interpolation: SincInterpolationType::Linear,
        window: WindowFunction::BlackmanHarris,
    };

    let mut resampler = SincFixedIn::<f32>::new(ratio, 1.0, params, samples.len(), 1)
        .map_err(|e| ResampleError::RubatoError(format!("resampler initialization failed: {e}")))?;

    let input = vec![samples.to_vec()];
    let mut output = resampler
        .process(&input, None)
        .map_err(|e| ResampleError::RubatoError(format!("{e}")))?;

    Ok(output.swap_remove(0))
}
