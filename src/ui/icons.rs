//! Status icons shared by every output path.

use super::theme::HrflowTheme;

/// Canonical status kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Step completed successfully.
    Success,
    /// Step failed.
    Failed,
    /// Step completed with a warning.
    Warning,
    /// Step is currently running.
    Running,
}

impl StatusKind {
    /// Unicode icon for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Failed => "✗",
            Self::Warning => "⚠",
            Self::Running => "◆",
        }
    }

    /// Bracketed text for non-TTY output.
    pub fn bracketed(self) -> &'static str {
        match self {
            Self::Success => "[ok]",
            Self::Failed => "[FAIL]",
            Self::Warning => "[warn]",
            Self::Running => "[run]",
        }
    }

    /// Styled icon string using the given theme.
    pub fn styled(self, theme: &HrflowTheme) -> String {
        let icon = self.icon();
        match self {
            Self::Success => theme.success.apply_to(icon).to_string(),
            Self::Failed => theme.error.apply_to(icon).to_string(),
            Self::Warning => theme.warning.apply_to(icon).to_string(),
            Self::Running => theme.info.apply_to(icon).to_string(),
        }
    }

    /// Format a status line: styled icon + message.
    pub fn format(self, theme: &HrflowTheme, msg: &str) -> String {
        format!("{} {}", self.styled(theme), msg)
    }

    /// Format a status line for non-TTY: bracketed + message.
    pub fn format_plain(self, msg: &str) -> String {
        format!("{} {}", self.bracketed(), msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_format_uses_brackets() {
        assert_eq!(StatusKind::Failed.format_plain("Add User"), "[FAIL] Add User");
        assert_eq!(StatusKind::Warning.format_plain("x"), "[warn] x");
    }

    #[test]
    fn styled_with_plain_theme_is_bare_icon() {
        let theme = HrflowTheme::plain();
        assert_eq!(StatusKind::Success.styled(&theme), "✓");
        assert_eq!(StatusKind::Running.format(&theme, "Login"), "◆ Login");
    }
}
