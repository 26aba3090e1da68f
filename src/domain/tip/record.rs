//! Metadata records written to and read from the document store

use chrono::{DateTime, Utc};

use super::audio_tip::AudioTip;

/// Placeholder title for stored documents without one
pub const UNTITLED: &str = "Untitled";

/// Placeholder transcript for stored documents without one
pub const NO_TRANSCRIPT: &str = "No transcript available.";

/// A record describing one published audio tip.
/// Inserted once; the store assigns the document identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipRecord {
    pub title: String,
    pub transcript: String,
    pub audio_file: String,
    pub audio_url: String,
    pub created_at: DateTime<Utc>,
}

impl TipRecord {
    /// Build the record for a tip whose audio was published at `audio_url`
    pub fn for_tip(tip: &AudioTip, audio_url: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            title: tip.title.clone(),
            transcript: tip.transcript.clone(),
            audio_file: tip.audio_file.to_string(),
            audio_url: audio_url.into(),
            created_at,
        }
    }
}

/// A document read back from the store. Fields are optional because the
/// collection is schemaless and may hold documents written by other tools.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredTip {
    pub id: String,
    pub title: Option<String>,
    pub transcript: Option<String>,
    pub audio_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl StoredTip {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    pub fn display_transcript(&self) -> &str {
        self.transcript.as_deref().unwrap_or(NO_TRANSCRIPT)
    }

    pub fn display_created_at(&self) -> String {
        self.created_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Case-insensitive title match; a blank term matches everything
    pub fn matches_title(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty() || self.display_title().to_lowercase().contains(&term)
    }
}

/// Sort newest first; documents without a timestamp go last
pub fn sort_newest_first(tips: &mut [StoredTip]) {
    tips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
