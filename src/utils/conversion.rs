/// Mel scale model used by [`hz_to_mel`] and [`mel_to_hz`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MelModel {
    /// `mel = 1000 * log2(1 + f/1000)`
    #[default]
    Fant,
    /// `mel = 2595 * log10(1 + f/700)`
    Shaughnessy,
    /// `mel = f / (2.4e-4*f + 0.741)`
    Umesh,
}

/// Converts a frequency in Hz to mel.
///
/// # Examples
/// ```
/// use aca_rs::utils::conversion::{hz_to_mel, MelModel};
/// let mel = hz_to_mel(1000.0, MelModel::Fant);
/// assert!((mel - 1000.0).abs() < 1e-3);
/// ```
pub fn hz_to_mel(f: f32, model: MelModel) -> f32 {
    match model {
        MelModel::Fant => 1000.0 * (1.0 + f / 1000.0).log2(),
        MelModel::Shaughnessy => 2595.0 * (1.0 + f / 700.0).log10(),
        MelModel::Umesh => f / (2.4e-4 * f + 0.741),
    }
}

/// Converts a mel value back to Hz; exact inverse of [`hz_to_mel`].
pub fn mel_to_hz(mel: f32, model: MelModel) -> f32 {
    match model {
        MelModel::Fant => 1000.0 * (2.0f32.powf(mel / 1000.0) - 1.0),
        MelModel::Shaughnessy => 700.0 * (10.0f32.powf(mel / 2595.0) - 1.0),
        MelModel::Umesh => mel * 0.741 / (1.0 - mel * 2.4e-4),
    }
}

/// Converts a frequency in Hz to a (floating point) MIDI pitch.
///
/// Non-positive frequencies map to 0. `a4` is the reference tuning frequency
/// (default 440 Hz).
pub fn hz_to_midi(f: f32, a4: Option<f32>) -> f32 {
    let a4 = a4.unwrap_or(440.0);
    if f <= 0.0 {
        return 0.0;
    }
    69.0 + 12.0 * (f / a4).log2()
}

/// Converts a (floating point) MIDI pitch to Hz.
///
/// Negative pitches map to 0. `a4` is the reference tuning frequency
/// (default 440 Hz).
pub fn midi_to_hz(pitch: f32, a4: Option<f32>) -> f32 {
    let a4 = a4.unwrap_or(440.0);
    if pitch < 0.0 {
        return 0.0;
    }
    a4 * 2.0f32.powf((pitch - 69.0) / 12.0)
}

/// Converts a frequency in Hz to a (floating point) FFT bin index.
pub fn hz_to_bin(f: f32, fft_length: usize, f_s: f32) -> f32 {
    f / f_s * fft_length as f32
}

/// Converts an FFT bin index (may be fractional) to Hz.
pub fn bin_to_hz(bin: f32, fft_length: usize, f_s: f32) -> f32 {
    bin * f_s / fft_length as f32
}

/// Frequencies of the one-sided FFT bins: `f[k] = k * f_s / block_length`
/// for `k = 0..=block_length/2`.
pub fn fft_frequencies(f_s: f32, block_length: usize) -> Vec<f32> {
    (0..=block_length / 2)
        .map(|k| k as f32 * f_s / block_length as f32)
        .collect()
}
