pub mod core;

pub use core::{AudioData, AudioError, export_to_wav, get_sr, load};
