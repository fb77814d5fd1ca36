use ndarray::{Array1, Array2, Axis};

use crate::features::spectral_pitch_chroma;
use crate::io::AudioError;
use crate::signal_processing::compute_spectrogram;

/// The 24 key labels, majors first, indexed by `mode * 12 + root`.
pub const KEY_NAMES: [&str; 24] = [
    "C Maj", "C# Maj", "D Maj", "D# Maj", "E Maj", "F Maj", "F# Maj", "G Maj", "G# Maj",
    "A Maj", "A# Maj", "B Maj", "c min", "c# min", "d min", "d# min", "e min", "f min",
    "f# min", "g min", "g# min", "a min", "a# min", "b min",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyMode {
    Major,
    Minor,
}

/// A detected musical key: root pitch class (0 = C) and mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub root: usize,
    pub mode: KeyMode,
}

impl Key {
    pub fn label(&self) -> &'static str {
        let mode_offset = match self.mode {
            KeyMode::Major => 0,
            KeyMode::Minor => 12,
        };
        KEY_NAMES[mode_offset + self.root]
    }
}

// Krumhansl major/minor key profiles.
const KEY_PROFILES: [[f32; 12]; 2] = [
    [6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88],
    [6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17],
];

/// Detects the musical key of the signal.
///
/// The pitch chroma is averaged over all blocks and compared against the
/// Krumhansl major and minor profiles (each normalized to sum 1) under all 12
/// rotations; the smallest Manhattan distance wins.
///
/// # Arguments
/// * `x` - Mono audio signal
/// * `f_s` - Sample rate of the audio data
/// * `window` - Optional analysis window; must have length `block_length`
/// * `block_length` - Optional block length (default: 4096)
/// * `hop_length` - Optional hop length (default: 2048)
pub fn compute_key(
    x: &[f32],
    f_s: f32,
    window: Option<&Array1<f32>>,
    block_length: Option<usize>,
    hop_length: Option<usize>,
) -> Result<Key, AudioError> {
    let (spec, _, _) = compute_spectrogram(
        x,
        f_s,
        window,
        Some(block_length.unwrap_or(4096)),
        Some(hop_length.unwrap_or(2048)),
        Some(true),
    )?;

    let chroma = spectral_pitch_chroma(&spec, f_s);
    let mean_chroma = chroma
        .mean_axis(Axis(1))
        .unwrap_or_else(|| Array1::zeros(12));

    let profiles = normalized_profiles();

    let mut best = (0usize, 0usize, f32::INFINITY);
    for mode in 0..2 {
        for shift in 0..12 {
            let dist: f32 = (0..12)
                .map(|pc| (mean_chroma[pc] - profiles[[mode, (pc + 12 - shift) % 12]]).abs())
                .sum();
            if dist < best.2 {
                best = (mode, shift, dist);
            }
        }
    }

    Ok(Key {
        root: best.1,
        mode: if best.0 == 0 { KeyMode::Major } else { KeyMode::Minor },
    })
}

fn normalized_profiles() -> Array2<f32> {
    let mut profiles = Array2::zeros((2, 12));
    for (mode, profile) in KEY_PROFILES.iter().enumerate() {
        let sum: f32 = profile.iter().sum();
        for (pc, &v) in profile.iter().enumerate() {
            profiles[[mode, pc]] = v / sum;
        }
    }
    profiles
}
