/// Downmixes interleaved multi-channel samples into one channel.
///
/// Each output sample is the arithmetic mean across channels. With
/// `channels == 1` the input is returned unchanged.
pub fn downmix(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    let mut mono = Vec::with_capacity(samples.len() / channels);
    for chunk in samples.chunks(channels) {
        let sum: f32 = chunk.iter().sum();
        mono.push(sum / channels as f32);
    }
    mono
}

/// Peak-normalizes a signal to [-1, 1].
///
/// A peak of exactly zero leaves the signal unchanged.
pub fn normalize_audio(x: &[f32]) -> Vec<f32> {
    let peak = x.iter().fold(0.0f32, |acc, &v| acc.max(v.abs()));
    if peak == 0.0 {
        return x.to_vec();
    }
    x.iter().map(|&v| v / peak).collect()
}

/// Pre-processes an audio signal: downmix to mono, then optional peak
/// normalization.
///
/// # Arguments
/// * `samples` - Interleaved audio samples
/// * `channels` - Number of interleaved channels
/// * `normalize` - Optional flag to peak-normalize (defaults to true)
pub fn preprocess_audio(samples: &[f32], channels: usize, normalize: Option<bool>) -> Vec<f32> {
    let x = downmix(samples, channels);
    if normalize.unwrap_or(true) {
        normalize_audio(&x)
    } else {
        x
    }
}
