//! Policy for audio files that already exist locally

/// What to do when a tip's audio file is already present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPolicy {
    /// Synthesize again and replace the file
    Overwrite,
    /// Keep the existing file and skip synthesis
    SkipExisting,
}

impl GenerationPolicy {
    /// Policy from the `skip_existing` setting, or `default` when unset
    pub fn from_skip_existing(skip_existing: Option<bool>, default: Self) -> Self {
        match skip_existing {
            Some(true) => Self::SkipExisting,
            Some(false) => Self::Overwrite,
            None => default,
        }
    }

    pub const fn skips_existing(&self) -> bool {
        matches!(self, Self::SkipExisting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_setting_wins() {
        assert_eq!(
            GenerationPolicy::from_skip_existing(Some(true), GenerationPolicy::Overwrite),
            GenerationPolicy::SkipExisting
        );
        assert_eq!(
            GenerationPolicy::from_skip_existing(Some(false), GenerationPolicy::SkipExisting),
            GenerationPolicy::Overwrite
        );
    }

    #[test]
    fn unset_uses_default() {
        assert_eq!(
            GenerationPolicy::from_skip_existing(None, GenerationPolicy::SkipExisting),
            GenerationPolicy::SkipExisting
        );
    }
}
