//! Speech synthesis options

/// Default spoken language (IETF tag understood by Google Translate)
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default Google Translate top-level domain, which selects the accent
pub const DEFAULT_TLD: &str = "com";

/// Options passed to the speech synthesizer for every tip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechOptions {
    pub language: String,
    pub tld: String,
    pub slow: bool,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            tld: DEFAULT_TLD.to_string(),
            slow: false,
        }
    }
}
