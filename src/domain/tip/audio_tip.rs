//! Audio tip entity and file name value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidFileNameError;

/// Name of a tip's audio file, relative to the output directory.
///
/// Only bare file names are accepted so a tip can never write outside the
/// output directory or collide with the blob prefix layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TipFileName(String);

impl TipFileName {
    /// Wrap a name known at compile time to be valid (built-in catalogs).
    pub(super) fn from_static(name: &'static str) -> Self {
        debug_assert!(name.parse::<TipFileName>().is_ok(), "invalid built-in name {name}");
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File extension without the dot, if any
    pub fn extension(&self) -> Option<&str> {
        self.0
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }
}

impl FromStr for TipFileName {
    type Err = InvalidFileNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = trimmed.is_empty()
            || trimmed == "."
            || trimmed == ".."
            || trimmed.contains(['/', '\\'])
            || trimmed.chars().any(char::is_control);

        if invalid {
            return Err(InvalidFileNameError {
                input: s.to_string(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for TipFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TipFileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A catalog entry: the text to speak and where its audio lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioTip {
    pub title: String,
    pub transcript: String,
    pub audio_file: TipFileName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_file_name() {
        let name: TipFileName = "hydration.mp3".parse().unwrap();
        assert_eq!(name.as_str(), "hydration.mp3");
        assert_eq!(name.extension(), Some("mp3"));
    }

    #[test]
    fn trims_whitespace() {
        let name: TipFileName = "  sleep.mp3 ".parse().unwrap();
        assert_eq!(name.to_string(), "sleep.mp3");
    }

    #[test]
    fn rejects_paths_and_empty_names() {
        for input in ["", "   ", ".", "..", "a/b.mp3", "..\\x.mp3", "/etc/passwd"] {
            assert!(input.parse::<TipFileName>().is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn extension_missing() {
        let name: TipFileName = "noext".parse().unwrap();
        assert_eq!(name.extension(), None);
        let name: TipFileName = "trailing.".parse().unwrap();
        assert_eq!(name.extension(), None);
    }
}
