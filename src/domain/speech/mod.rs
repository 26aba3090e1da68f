//! Speech domain module

mod audio_data;
mod options;

pub use audio_data::{AudioData, AudioMimeType};
pub use options::{SpeechOptions, DEFAULT_LANGUAGE, DEFAULT_TLD};
