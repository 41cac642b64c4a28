//! Bounded polling waits.
//!
//! Every wait is a sequence of visibility checks separated by
//! [`Driver::pause`]. A wait is spent once either the paused time or the
//! wall-clock time since it started reaches the timeout, so slow WebDriver
//! round trips count against the budget. A timeout is the only way a wait
//! ends without the element showing up.

use std::time::{Duration, Instant};

use tracing::debug;

use super::{Driver, DriverError, DriverResult, Target};

const MIN_POLL: Duration = Duration::from_millis(1);

/// Wait until `target` is visible, failing with [`DriverError::Timeout`].
pub fn wait_visible<D: Driver + ?Sized>(
    driver: &mut D,
    target: &Target,
    timeout: Duration,
    poll: Duration,
) -> DriverResult<()> {
    if appears(driver, target, timeout, poll)? {
        Ok(())
    } else {
        Err(DriverError::Timeout {
            what: target.to_string(),
            waited: timeout,
        })
    }
}

/// Report whether `target` becomes visible within `timeout`.
pub fn appears<D: Driver + ?Sized>(
    driver: &mut D,
    target: &Target,
    timeout: Duration,
    poll: Duration,
) -> DriverResult<bool> {
    let poll = poll.max(MIN_POLL);
    let started = Instant::now();
    let mut paused = Duration::ZERO;

    loop {
        let visible = driver.is_visible(target)?;
        let spent = paused.max(started.elapsed());
        if visible {
            debug!("{} visible after {}ms", target, spent.as_millis());
            return Ok(true);
        }
        if spent >= timeout {
            return Ok(false);
        }
        let step = poll.min(timeout - spent);
        driver.pause(step);
        paused += step;
    }
}
