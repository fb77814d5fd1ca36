pub mod conversion;
pub mod viterbi;

pub use conversion::{
    MelModel, bin_to_hz, fft_frequencies, hz_to_bin, hz_to_mel, hz_to_midi, mel_to_hz, midi_to_hz,
};
pub use viterbi::viterbi_log;
