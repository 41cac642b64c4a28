//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Progress plus detail lines: resolved settings, option listings,
    /// failure classification.
    Verbose,
    /// Show progress and status.
    #[default]
    Normal,
    /// Summary, final status and errors only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows detail lines.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows headers, spinners and warnings.
    pub fn shows_progress(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_hides_progress_only() {
        assert!(!OutputMode::Quiet.shows_progress());
        assert!(!OutputMode::Quiet.shows_details());
        assert!(OutputMode::default().shows_progress());
    }

    #[test]
    fn only_verbose_shows_details() {
        assert!(!OutputMode::Normal.shows_details());
        assert!(OutputMode::Verbose.shows_details());
        assert!(OutputMode::Verbose.shows_progress());
    }
}
