//! Failure screenshots.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::driver::Driver;

/// Writes failure screenshots into one directory.
///
/// Each step has a fixed file name, so a repeated failure overwrites the
/// previous capture.
#[derive(Debug, Clone)]
pub struct ScreenshotStore {
    dir: PathBuf,
}

impl ScreenshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Capture the page into `file_name`. Failures are logged, never raised.
    pub fn capture<D: Driver + ?Sized>(&self, driver: &mut D, file_name: &str) -> Option<PathBuf> {
        let bytes = match driver.screenshot() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Could not capture screenshot {}: {}", file_name, e);
                return None;
            }
        };

        let path = self.dir.join(file_name);
        let written = fs::create_dir_all(&self.dir).and_then(|_| fs::write(&path, &bytes));
        match written {
            Ok(()) => {
                info!("Saved screenshot to {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!("Could not write screenshot {}: {}", path.display(), e);
                None
            }
        }
    }
}
