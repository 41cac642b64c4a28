//! Non-interactive UI for CI/headless environments.

use super::{OutputMode, SpinnerHandle, StatusKind, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Spinners become a single status line printed when the step finishes.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn start_spinner(&mut self, _message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(LineSpinner {
            quiet: !self.mode.shows_progress(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            println!("\n=== {} ===\n", title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints one line per finished step.
struct LineSpinner {
    quiet: bool,
}

impl LineSpinner {
    fn print(&self, kind: StatusKind, msg: &str) {
        if !self.quiet {
            println!("{}", kind.format_plain(msg));
        }
    }
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        self.print(StatusKind::Success, msg);
    }

    fn finish_warning(&mut self, msg: &str) {
        self.print(StatusKind::Warning, msg);
    }

    fn finish_error(&mut self, msg: &str) {
        // Failures are reported even in quiet mode.
        eprintln!("{}", StatusKind::Failed.format_plain(msg));
    }
}
