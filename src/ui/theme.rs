//! Visual theme and styling.

use console::Style;

/// hrflow's visual theme.
#[derive(Debug, Clone)]
pub struct HrflowTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for running elements (magenta).
    pub info: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (magenta bold).
    pub header: Style,
    /// Style for step counters such as `[3/8]` (dim).
    pub step_number: Style,
}

impl Default for HrflowTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl HrflowTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().magenta(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().magenta(),
            step_number: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            step_number: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("◆"),
            self.highlight.apply_to(title)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_formats_statuses() {
        let theme = HrflowTheme::plain();
        assert_eq!(theme.format_success("Login"), "✓ Login");
        assert_eq!(theme.format_warning("Validate Update"), "⚠ Validate Update");
        assert_eq!(theme.format_error("Add User"), "✗ Add User");
    }

    #[test]
    fn header_contains_title() {
        let theme = HrflowTheme::plain();
        let msg = theme.format_header("hrflow");
        assert!(msg.contains("hrflow"));
        assert!(msg.contains("◆"));
    }

    #[test]
    fn default_impl_matches_new() {
        assert_eq!(
            HrflowTheme::default().format_error("x"),
            HrflowTheme::new().format_error("x")
        );
    }
}
