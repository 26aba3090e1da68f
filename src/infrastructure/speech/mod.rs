//! Text-to-speech adapters

mod chunker;
mod google_translate;

pub use chunker::{split_text, MAX_CHUNK_CHARS};
pub use google_translate::GoogleTranslateTts;
