//! # ACA-RS: Audio Content Analysis in Rust
//!
//! ACA-RS is a collection of audio content analysis algorithms: blocking and
//! spectrogram computation, instantaneous spectral and time-domain features,
//! novelty functions for onset detection, pitch tracking, and musical key and
//! chord recognition. All analysis operates on mono `f32` samples and follows
//! one convention: spectral features consume a one-sided magnitude
//! spectrogram of shape `(block_length/2 + 1, num_blocks)`, time-domain
//! features consume raw samples and block them internally, and every
//! per-block result comes with block-center time stamps in seconds.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! aca-rs = "0.1.0"
//! ```
//!
//! ```no_run
//! use std::str::FromStr;
//! use aca_rs::{Feature, compute_feature, load};
//!
//! let audio = load("example.wav", None, Some(true)).unwrap();
//! let feature = Feature::from_str("SpectralCentroid").unwrap();
//! let (v, t) = compute_feature(
//!     feature,
//!     &audio.samples,
//!     audio.sample_rate as f32,
//!     None,
//!     None,
//!     None,
//! )
//! .unwrap();
//! println!("{} centroid values, first at {:.3} s", v.ncols(), t[0]);
//! ```

/// Audio input/output module.
///
/// Provides functions for loading and saving audio files, as well as handling audio data structures.
pub mod io;

/// Signal processing module.
///
/// Blocking, windowing, pre-processing, resampling, and spectrogram computation.
pub mod signal_processing;

/// Feature extraction module.
///
/// Instantaneous spectral and time-domain features, the feature dispatcher, and the beat histogram.
pub mod features;

/// Novelty module.
///
/// Novelty functions and peak picking for onset detection.
pub mod novelty;

/// Pitch tracking module.
///
/// Fundamental frequency estimation for monophonic audio.
pub mod pitch;

/// Harmony module.
///
/// Musical key detection and chord recognition.
pub mod harmony;

/// Utility module.
///
/// Frequency conversions and general-purpose helpers.
pub mod utils;

// Re-export all public items from the modules for convenient access at the crate root.
pub use features::*;
pub use harmony::*;
pub use io::*;
pub use novelty::*;
pub use pitch::*;
pub use signal_processing::*;
pub use utils::*;
