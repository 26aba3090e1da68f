//! Built-in tip catalogs

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidCatalogError;

use super::audio_tip::{AudioTip, TipFileName};

/// All available catalogs
pub const ALL_CATALOGS: &[CatalogId] = &[CatalogId::Sample, CatalogId::Pages];

/// (title, transcript, audio file)
type TipEntry = (&'static str, &'static str, &'static str);

const SAMPLE_TIPS: &[TipEntry] = &[
    (
        "Stay Hydrated",
        "Drinking enough water helps maintain bodily functions and prevents dehydration.",
        "hydration.mp3",
    ),
    (
        "Get Enough Sleep",
        "Sleeping 7-8 hours helps your brain and body recover and function optimally.",
        "sleep.mp3",
    ),
];

const PAGE_TIPS: &[TipEntry] = &[
    (
        "Wash Your Hands",
        "Wash your hands thoroughly with soap and water for at least 20 seconds to prevent the spread of infections.",
        "handwashing-tip.mp3",
    ),
    (
        "Eat a Healthy Diet",
        "Include fresh fruits and vegetables in your diet daily to boost immunity and maintain overall health.",
        "healthy-diet-tip.mp3",
    ),
    (
        "Care for Your Mind",
        "Take regular breaks, meditate, and connect with loved ones to support your mental well-being.",
        "mental-health-tip.mp3",
    ),
    (
        "Stay Active",
        "Aim for at least 30 minutes of physical activity daily. Regular exercise improves your heart health and mood.",
        "exercise-tip.mp3",
    ),
];

/// Identifiers for the hardcoded tip catalogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CatalogId {
    /// Tips published to the document store by default
    #[default]
    Sample,
    /// Tips played on the web tips page
    Pages,
}

impl CatalogId {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sample => "sample",
            Self::Pages => "pages",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sample => "Sample health tips",
            Self::Pages => "Tips page clips",
        }
    }

    fn entries(&self) -> &'static [TipEntry] {
        match self {
            Self::Sample => SAMPLE_TIPS,
            Self::Pages => PAGE_TIPS,
        }
    }

    /// Tips of this catalog, in processing order
    pub fn tips(&self) -> Vec<AudioTip> {
        self.entries()
            .iter()
            .map(|&(title, transcript, file)| AudioTip {
                title: title.to_string(),
                transcript: transcript.to_string(),
                audio_file: TipFileName::from_static(file),
            })
            .collect()
    }
}

impl FromStr for CatalogId {
    type Err = InvalidCatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sample" => Ok(Self::Sample),
            "pages" => Ok(Self::Pages),
            _ => Err(InvalidCatalogError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
