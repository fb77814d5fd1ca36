use aca_rs::{
    BeatHistoMethod, Novelty, PitchTracker, compute_beat_histogram, compute_chords, compute_key,
    compute_novelty, compute_pitch, viterbi_log,
};
use ndarray::{Array1, Array2, arr2};
use std::f32::consts::PI;

fn sine(freq: f32, f_s: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|n| (2.0 * PI * freq * n as f32 / f_s).sin())
        .collect()
}

fn c_major_triad(f_s: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|n| {
            let t = n as f32 / f_s;
            ((2.0 * PI * 261.63 * t).sin()
                + (2.0 * PI * 329.63 * t).sin()
                + (2.0 * PI * 392.00 * t).sin())
                / 3.0
        })
        .collect()
}

fn harmonic_tone(f_0: f32, f_s: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|n| {
            let t = n as f32 / f_s;
            (2.0 * PI * f_0 * t).sin()
                + 0.5 * (2.0 * PI * 2.0 * f_0 * t).sin()
                + 0.3 * (2.0 * PI * 3.0 * f_0 * t).sin()
                + 0.2 * (2.0 * PI * 4.0 * f_0 * t).sin()
        })
        .collect()
}

#[test]
fn test_pitch_trackers_on_harmonic_tone() {
    let f_s = 44100.0;
    let x = harmonic_tone(440.0, f_s, 44100);

    for (tracker, tolerance) in [
        (PitchTracker::TimeAcf, 10.0),
        (PitchTracker::SpectralHps, 12.0),
        (PitchTracker::SpectralAcf, 15.0),
    ] {
        let (f_0, t) = compute_pitch(tracker, &x, f_s, None, None, None).unwrap();
        assert_eq!(f_0.len(), t.len());
        // skip the zero-padded edge blocks
        let mid = f_0.len() / 2;
        assert!(
            (f_0[mid] - 440.0).abs() < tolerance,
            "{}: got {} Hz",
            tracker.name(),
            f_0[mid]
        );
    }
}

#[test]
fn test_pitch_amdf_on_low_tone() {
    // 80 Hz keeps a single period lag inside the 50..2000 Hz search range
    let f_s = 44100.0;
    let x = harmonic_tone(80.0, f_s, 44100);

    let (f_0, _) = compute_pitch(PitchTracker::TimeAmdf, &x, f_s, None, None, None).unwrap();
    let mid = f_0.len() / 2;
    assert!((f_0[mid] - 80.0).abs() < 2.0, "got {} Hz", f_0[mid]);
}

#[test]
fn test_pitch_zero_crossings_on_sine() {
    let f_s = 44100.0;
    let x = sine(440.0, f_s, 44100);

    let (f_0, _) =
        compute_pitch(PitchTracker::TimeZeroCrossings, &x, f_s, None, None, None).unwrap();
    let mid = f_0.len() / 2;
    assert!((f_0[mid] - 440.0).abs() < 5.0, "got {} Hz", f_0[mid]);
}

#[test]
fn test_pitch_on_silence() {
    let x = vec![0.0f32; 8192];
    for tracker in [
        PitchTracker::TimeAcf,
        PitchTracker::TimeAmdf,
        PitchTracker::TimeZeroCrossings,
    ] {
        let (f_0, _) = compute_pitch(tracker, &x, 44100.0, None, None, None).unwrap();
        for &v in f_0.iter() {
            assert_eq!(v, 0.0, "{}", tracker.name());
        }
    }
}

#[test]
fn test_novelty_detects_onset() {
    // one second of silence, then one second of a tone
    let f_s = 8000.0;
    let mut x = vec![0.0f32; 8000];
    x.extend(sine(440.0, f_s, 8000));

    let (d, t, peaks) =
        compute_novelty(Novelty::Flux, &x, f_s, None, Some(4096), Some(256)).unwrap();
    assert_eq!(d.len(), t.len());
    assert!(!peaks.is_empty());
    assert!(
        peaks.iter().any(|&p| (t[p] - 1.0).abs() < 0.4),
        "no peak near the onset: {:?}",
        peaks.iter().map(|&p| t[p]).collect::<Vec<_>>()
    );
}

#[test]
fn test_novelty_variants_are_finite() {
    let f_s = 8000.0;
    let x = sine(440.0, f_s, 8000);
    for novelty in [Novelty::Flux, Novelty::Laroche, Novelty::Hainsworth] {
        let (d, _, _) = compute_novelty(novelty, &x, f_s, None, None, None).unwrap();
        assert!(d.iter().all(|v| v.is_finite()), "{}", novelty.name());
    }
}

#[test]
fn test_key_of_c_major_triad() {
    let f_s = 44100.0;
    let x = c_major_triad(f_s, 44100);
    let key = compute_key(&x, f_s, None, None, None).unwrap();
    assert_eq!(key.label(), "C Maj");
}

#[test]
fn test_chords_of_c_major_triad() {
    let f_s = 44100.0;
    let x = c_major_triad(f_s, 44100);
    let seq = compute_chords(&x, f_s, None, None).unwrap();
    assert_eq!(seq.raw.len(), seq.smoothed.len());
    assert_eq!(seq.probabilities.nrows(), 24);

    let mid = seq.raw.len() / 2;
    assert_eq!(seq.raw_labels()[mid], "C Maj");
    assert_eq!(seq.smoothed_labels()[mid], "C Maj");
}

#[test]
fn test_chords_of_empty_signal() {
    let seq = compute_chords(&[], 44100.0, None, None).unwrap();
    assert!(seq.raw.is_empty());
    assert!(seq.smoothed.is_empty());
    assert!(seq.timestamps.is_empty());
    assert_eq!(seq.probabilities.shape(), &[24, 0]);
}

#[test]
fn test_viterbi_without_observations() {
    let p_e = Array2::<f32>::zeros((2, 0));
    let p_t = arr2(&[[0.7, 0.3], [0.4, 0.6]]);
    let p_s = Array1::from_vec(vec![0.6, 0.4]);

    let (path, prob) = viterbi_log(&p_e, &p_t, &p_s);
    assert!(path.is_empty());
    assert_eq!(prob.shape(), &[2, 0]);
}

#[test]
fn test_beat_histogram_corr() {
    let f_s = 8000.0;
    let x = sine(440.0, f_s, 16000);
    let (histo, bpm) =
        compute_beat_histogram(&x, f_s, Some(BeatHistoMethod::Corr), None, None, None).unwrap();
    assert_eq!(histo.len(), bpm.len());
    // the BPM axis runs from slow to fast
    assert!(bpm.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_beat_histogram_fft_range() {
    let f_s = 8000.0;
    let x = sine(440.0, f_s, 16000);
    let (histo, bpm) =
        compute_beat_histogram(&x, f_s, Some(BeatHistoMethod::Fft), None, None, None).unwrap();
    assert_eq!(histo.len(), bpm.len());
    assert!(!bpm.is_empty());
    assert!(bpm[0] < 30.0);
    assert!(*bpm.last().unwrap() <= 200.0);
    assert!(bpm.last().unwrap() > &190.0);
}

#[test]
fn test_viterbi_path() {
    // two hidden states, three observations
    let p_e = arr2(&[[0.5, 0.4, 0.1], [0.1, 0.3, 0.6]]);
    let p_t = arr2(&[[0.7, 0.3], [0.4, 0.6]]);
    let p_s = Array1::from_vec(vec![0.6, 0.4]);

    let (path, prob) = viterbi_log(&p_e, &p_t, &p_s);
    assert_eq!(path, vec![0, 0, 1]);
    assert_eq!(prob.shape(), &[2, 3]);
}
