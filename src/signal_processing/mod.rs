pub mod blocking;
pub mod preprocess;
pub mod resampling;
pub mod spectrogram;
pub mod window;

pub use blocking::block_audio;
pub use preprocess::{downmix, normalize_audio, preprocess_audio};
pub use resampling::resample;
pub use spectrogram::{compute_complex_spectrogram, compute_mel_spectrogram, compute_spectrogram};
pub use window::hann_periodic;
