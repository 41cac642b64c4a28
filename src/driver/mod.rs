//! Browser automation capability set.
//!
//! This module provides:
//! - [`Driver`] trait covering everything the workflow needs from a browser
//! - [`Locator`] and [`Target`] for addressing elements
//! - [`WebDriverSession`] speaking the W3C WebDriver protocol
//! - [`MockDriver`] for tests and dry runs
//! - bounded waits in [`wait`]

pub mod error;
pub mod locator;
pub mod mock;
pub mod wait;
pub mod webdriver;

use std::time::Duration;

pub use error::DriverError;
pub use locator::{FieldPart, Locator, Query, RowControl, Strategy, Target};
pub use mock::{Effect, MockAction, MockDriver};
pub use wait::{appears, wait_visible};
pub use webdriver::{BrowserOptions, WebDriverSession};

/// Result type for driver operations.
pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Keyboard input the workflow sends to the focused element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowDown,
    Enter,
    Escape,
    Delete,
    /// Ctrl+A.
    SelectAll,
}

/// A live, navigable browser page.
///
/// Implementations own exactly one page for their whole lifetime and are
/// driven sequentially; nothing here is shared across threads.
pub trait Driver {
    /// Load a URL in the page.
    fn navigate(&mut self, url: &str) -> DriverResult<()>;

    /// Number of elements currently matching the locator.
    fn count(&mut self, locator: &Locator) -> DriverResult<usize>;

    /// Whether the target exists and is displayed. Missing elements are not an error.
    fn is_visible(&mut self, target: &Target) -> DriverResult<bool>;

    /// Click the target.
    fn click(&mut self, target: &Target) -> DriverResult<()>;

    /// Replace the target's value with `text`.
    fn fill(&mut self, target: &Target, text: &str) -> DriverResult<()>;

    /// Rendered text of the target.
    fn text(&mut self, target: &Target) -> DriverResult<String>;

    /// Send a key press to the page.
    fn press_key(&mut self, key: Key) -> DriverResult<()>;

    /// Click the target from a page-side script, bypassing overlays.
    fn script_click(&mut self, target: &Target) -> DriverResult<()>;

    /// Capture the page as PNG bytes.
    fn screenshot(&mut self) -> DriverResult<Vec<u8>>;

    /// Let the page settle.
    fn pause(&mut self, duration: Duration);

    /// End the session. Later calls fail with [`DriverError::SessionClosed`].
    fn close(&mut self) -> DriverResult<()>;
}

impl<D: Driver + ?Sized> Driver for Box<D> {
    fn navigate(&mut self, url: &str) -> DriverResult<()> {
        (**self).navigate(url)
    }

    fn count(&mut self, locator: &Locator) -> DriverResult<usize> {
        (**self).count(locator)
    }

    fn is_visible(&mut self, target: &Target) -> DriverResult<bool> {
        (**self).is_visible(target)
    }

    fn click(&mut self, target: &Target) -> DriverResult<()> {
        (**self).click(target)
    }

    fn fill(&mut self, target: &Target, text: &str) -> DriverResult<()> {
        (**self).fill(target, text)
    }

    fn text(&mut self, target: &Target) -> DriverResult<String> {
        (**self).text(target)
    }

    fn press_key(&mut self, key: Key) -> DriverResult<()> {
        (**self).press_key(key)
    }

    fn script_click(&mut self, target: &Target) -> DriverResult<()> {
        (**self).script_click(target)
    }

    fn screenshot(&mut self) -> DriverResult<Vec<u8>> {
        (**self).screenshot()
    }

    fn pause(&mut self, duration: Duration) {
        (**self).pause(duration)
    }

    fn close(&mut self) -> DriverResult<()> {
        (**self).close()
    }
}
