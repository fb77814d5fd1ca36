use std::f32::consts::PI;

use ndarray::{Array1, Array2, Axis};

use crate::features::spectral_pitch_chroma;
use crate::io::AudioError;
use crate::signal_processing::compute_spectrogram;

/// The 24 chord labels, major triads first, indexed by `mode * 12 + root`.
pub const CHORD_NAMES: [&str; 24] = [
    "C Maj", "C# Maj", "D Maj", "D# Maj", "E Maj", "F Maj", "F# Maj", "G Maj", "G# Maj",
    "A Maj", "A# Maj", "B Maj", "c min", "c# min", "d min", "d# min", "e min", "f min",
    "f# min", "g min", "g# min", "a min", "a# min", "b min",
];

/// Per-block chord estimates: a raw template-match sequence and a
/// Viterbi-smoothed one, both as indices into [`CHORD_NAMES`].
#[derive(Debug, Clone)]
pub struct ChordSequence {
    pub raw: Vec<usize>,
    pub smoothed: Vec<usize>,
    /// Chord probabilities per block, shape `(24, num_blocks)`.
    pub probabilities: Array2<f32>,
    /// Block time stamps in seconds.
    pub timestamps: Vec<f32>,
}

impl ChordSequence {
    pub fn raw_labels(&self) -> Vec<&'static str> {
        self.raw.iter().map(|&i| CHORD_NAMES[i]).collect()
    }

    pub fn smoothed_labels(&self) -> Vec<&'static str> {
        self.smoothed.iter().map(|&i| CHORD_NAMES[i]).collect()
    }
}

/// Recognizes the chord sequence of the signal.
///
/// The per-block pitch chroma is matched against 24 triad templates to give
/// chord probabilities; the raw sequence takes the per-block maximum, the
/// smoothed one decodes the probabilities with Viterbi under transition
/// probabilities derived from circle-of-fifths distances.
///
/// # Arguments
/// * `x` - Mono audio signal
/// * `f_s` - Sample rate of the audio data
/// * `block_length` - Optional block length (default: 8192)
/// * `hop_length` - Optional hop length (default: 2048)
pub fn compute_chords(
    x: &[f32],
    f_s: f32,
    block_length: Option<usize>,
    hop_length: Option<usize>,
) -> Result<ChordSequence, AudioError> {
    let (spec, _, t) = compute_spectrogram(
        x,
        f_s,
        None,
        Some(block_length.unwrap_or(8192)),
        Some(hop_length.unwrap_or(2048)),
        Some(true),
    )?;

    let chroma = spectral_pitch_chroma(&spec, f_s);
    let templates = chord_templates();

    let mut p_e = templates.dot(&chroma);
    for mut col in p_e.axis_iter_mut(Axis(1)) {
        let sum = col.sum();
        let norm = if sum == 0.0 { 1.0 } else { sum };
        col.mapv_inplace(|v| v / norm);
    }

    let raw = p_e
        .axis_iter(Axis(1))
        .map(|col| {
            col.iter()
                .enumerate()
                .fold((0usize, f32::NEG_INFINITY), |(bi, bv), (i, &v)| {
                    if v > bv { (i, v) } else { (bi, bv) }
                })
                .0
        })
        .collect();

    let p_t = chord_transition_probabilities();
    let p_s = Array1::from_elem(24, 1.0 / 24.0);
    let (smoothed, _) = crate::utils::viterbi_log(&p_e, &p_t, &p_s);

    Ok(ChordSequence {
        raw,
        smoothed,
        probabilities: p_e,
        timestamps: t,
    })
}

// 12 major and 12 minor triads, all chord pitches weighted equally.
fn chord_templates() -> Array2<f32> {
    let mut templates = Array2::zeros((24, 12));
    for root in 0..12 {
        for &interval in &[0, 4, 7] {
            templates[[root, (root + interval) % 12]] = 1.0 / 3.0;
        }
        for &interval in &[0, 3, 7] {
            templates[[12 + root, (root + interval) % 12]] = 1.0 / 3.0;
        }
    }
    templates
}

// Transition probabilities from chord-to-chord distances on the circle of
// fifths, with the two modes separated along a third axis.
fn chord_transition_probabilities() -> Array2<f32> {
    const CIRCLE: [i32; 24] = [
        0, -5, 2, -3, 4, -1, 6, 1, -4, 3, -2, 5, -3, 4, -1, 6, 1, -4, 3, -2, 5, 0, -5, 2,
    ];
    const MODE_DISTANCE: f32 = 0.5;

    let pos: Vec<(f32, f32, f32)> = CIRCLE
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let angle = 2.0 * PI * c as f32 / 12.0;
            let z = if i < 12 { MODE_DISTANCE } else { 0.0 };
            (angle.cos(), angle.sin(), z)
        })
        .collect();

    let mut p_t = Array2::zeros((24, 24));
    let mut max_dist = 0.0f32;
    for m in 0..24 {
        for n in 0..24 {
            let d = ((pos[m].0 - pos[n].0).powi(2)
                + (pos[m].1 - pos[n].1).powi(2)
                + (pos[m].2 - pos[n].2).powi(2))
            .sqrt();
            p_t[[m, n]] = 0.1 + d;
            max_dist = max_dist.max(d);
        }
    }

    p_t.mapv_inplace(|v| 1.0 - v / (0.2 + max_dist));
    for mut col in p_t.axis_iter_mut(Axis(1)) {
        let sum = col.sum();
        col.mapv_inplace(|v| v / sum);
    }
    p_t
}
