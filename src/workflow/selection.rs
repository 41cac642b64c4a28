//! Dropdown and autocomplete selection.
//!
//! Dropdowns are picked by position. The requested index is clamped to the
//! last option offered, so a shorter option list degrades to its final entry
//! instead of failing the step. Autocomplete fields take whatever suggestion
//! comes first after a settle delay.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::surface::{dropdown_toggle, dropdown_value, employee_hint, options};
use crate::config::Timeouts;
use crate::driver::{appears, wait_visible, Driver, Key};
use crate::error::{HrflowError, Result};

/// Pause before confirming the highlighted suggestion.
const KEY_SETTLE: Duration = Duration::from_millis(500);

/// Which option a dropdown selection ended on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedOption {
    /// Index actually clicked.
    pub index: usize,
    /// Index that was asked for.
    pub requested: usize,
    /// Text of the clicked option.
    pub label: String,
}

impl SelectedOption {
    pub fn was_clamped(&self) -> bool {
        self.index != self.requested
    }
}

/// Result of an autocomplete pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggestion {
    /// The first suggestion was confirmed with the keyboard.
    Selected,
    /// Nothing was suggested within the timeout.
    Empty,
}

/// Clamp `requested` to `available` options; `None` when there are none.
pub fn clamp_option_index(requested: usize, available: usize) -> Option<usize> {
    if available == 0 {
        None
    } else {
        Some(requested.min(available - 1))
    }
}

/// Open the dropdown labelled `label` and click its option at `requested`.
pub fn select_option<D: Driver + ?Sized>(
    driver: &mut D,
    label: &str,
    requested: usize,
    timeouts: &Timeouts,
) -> Result<SelectedOption> {
    let poll = timeouts.poll();
    debug!("Selecting dropdown '{}' with index {}", label, requested);

    let toggle = dropdown_toggle(label).first();
    wait_visible(driver, &toggle, timeouts.element(), poll)?;
    driver.click(&toggle)?;

    let list = options();
    wait_visible(driver, &list.first(), timeouts.dropdown(), poll)?;

    let count = driver.count(&list)?;
    debug!("Dropdown '{}' has {} available options", label, count);
    let index = clamp_option_index(requested, count).ok_or_else(|| {
        HrflowError::UnexpectedOptionCount {
            control: label.to_string(),
            count,
        }
    })?;
    if index != requested {
        warn!(
            "Adjusted '{}' option index {} to {} (available options: {})",
            label, requested, index, count
        );
    }

    let option = list.nth(index);
    let text = if driver.is_visible(&option)? {
        driver.text(&option)?
    } else {
        format!("Option {}", index)
    };

    wait_visible(driver, &option, timeouts.option(), poll)?;
    driver.click(&option)?;

    info!("Selected '{}' - {} (index {})", label, text, index);
    Ok(SelectedOption {
        index,
        requested,
        label: text,
    })
}

/// Type `seed` into the employee field and take the first suggestion.
pub fn choose_autocomplete<D: Driver + ?Sized>(
    driver: &mut D,
    seed: &str,
    timeouts: &Timeouts,
) -> Result<Suggestion> {
    let poll = timeouts.poll();
    debug!("Selecting employee with search text '{}'", seed);

    let field = employee_hint().first();
    wait_visible(driver, &field, timeouts.element(), poll)?;
    driver.click(&field)?;
    driver.fill(&field, "")?;
    driver.fill(&field, seed)?;

    if !appears(driver, &options().first(), timeouts.suggestion(), poll)? {
        warn!(
            "No employee suggestions appeared within {}ms",
            timeouts.suggestion().as_millis()
        );
        return Ok(Suggestion::Empty);
    }

    driver.pause(timeouts.suggestion_settle());
    driver.press_key(Key::ArrowDown)?;
    driver.pause(KEY_SETTLE);
    driver.press_key(Key::Enter)?;
    info!("Employee selected using keyboard navigation");
    Ok(Suggestion::Selected)
}

/// Text currently shown by a dropdown, or "Unknown".
pub fn current_dropdown_value<D: Driver + ?Sized>(
    driver: &mut D,
    label: &str,
    timeouts: &Timeouts,
) -> String {
    let value = dropdown_value(label).first();
    match appears(driver, &value, timeouts.optional(), timeouts.poll()) {
        Ok(true) => driver
            .text(&value)
            .unwrap_or_else(|_| "Unknown".to_string()),
        _ => "Unknown".to_string(),
    }
}

/// Open a dropdown, list its options as `"i: text"`, and close it again.
pub fn list_dropdown_options<D: Driver + ?Sized>(
    driver: &mut D,
    label: &str,
    timeouts: &Timeouts,
) -> Result<Vec<String>> {
    driver.click(&dropdown_toggle(label).first())?;

    let list = options();
    wait_visible(driver, &list.first(), timeouts.option(), timeouts.poll())?;

    let count = driver.count(&list)?;
    let mut entries = Vec::with_capacity(count);
    for i in 0..count {
        entries.push(format!("{}: {}", i, driver.text(&list.nth(i))?));
    }

    driver.press_key(Key::Escape)?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{Effect, MockAction, MockDriver};
    use crate::error::FailureKind;

    fn dropdown(texts: &[&str]) -> MockDriver {
        let mut driver = MockDriver::new();
        let toggle = dropdown_toggle("Status");
        driver.show(toggle.clone(), 1);
        driver.on_click(toggle, vec![Effect::show_texts(options(), texts)]);
        driver
    }

    fn fast() -> Timeouts {
        Timeouts {
            element_ms: 300,
            dropdown_ms: 300,
            option_ms: 300,
            suggestion_ms: 300,
            optional_ms: 300,
            ..Timeouts::default()
        }
    }

    #[test]
    fn clamp_keeps_in_range_indices() {
        assert_eq!(clamp_option_index(0, 3), Some(0));
        assert_eq!(clamp_option_index(2, 3), Some(2));
    }

    #[test]
    fn clamp_degrades_to_last_option() {
        assert_eq!(clamp_option_index(3, 3), Some(2));
        assert_eq!(clamp_option_index(usize::MAX, 1), Some(0));
        assert_eq!(clamp_option_index(0, 0), None);
    }

    #[test]
    fn index_one_of_two_is_not_clamped() {
        let mut driver = dropdown(&["Enabled", "Disabled"]);
        let selected = select_option(&mut driver, "Status", 1, &fast()).unwrap();
        assert_eq!(selected.index, 1);
        assert_eq!(selected.label, "Disabled");
        assert!(!selected.was_clamped());
        assert!(driver
            .actions()
            .contains(&MockAction::Click(options().nth(1))));
    }

    #[test]
    fn index_five_of_three_selects_last() {
        let mut driver = dropdown(&["-- Select --", "Enabled", "Disabled"]);
        let selected = select_option(&mut driver, "Status", 5, &fast()).unwrap();
        assert_eq!(selected.index, 2);
        assert_eq!(selected.requested, 5);
        assert_eq!(selected.label, "Disabled");
        assert!(selected.was_clamped());
    }

    #[test]
    fn dropdown_that_never_opens_times_out() {
        let mut driver = MockDriver::new();
        driver.show(dropdown_toggle("Status"), 1);
        let err = select_option(&mut driver, "Status", 0, &fast()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::ElementOrTimeout);
        assert_eq!(driver.elapsed(), Duration::from_millis(300));
    }

    #[test]
    fn autocomplete_confirms_first_suggestion_by_keyboard() {
        let mut driver = MockDriver::new();
        driver.show(employee_hint(), 1);
        driver.on_fill(employee_hint(), vec![Effect::show_texts(options(), &["Anna"])]);

        let picked = choose_autocomplete(&mut driver, "a", &fast()).unwrap();
        assert_eq!(picked, Suggestion::Selected);
        assert_eq!(driver.keys_pressed(), vec![Key::ArrowDown, Key::Enter]);
        assert_eq!(driver.field_value(&employee_hint().first()), Some("a"));
    }

    #[test]
    fn autocomplete_without_suggestions_is_empty() {
        let mut driver = MockDriver::new();
        driver.show(employee_hint(), 1);

        let picked = choose_autocomplete(&mut driver, "zz", &fast()).unwrap();
        assert_eq!(picked, Suggestion::Empty);
        assert!(driver.keys_pressed().is_empty());
    }

    #[test]
    fn current_value_falls_back_to_unknown() {
        let mut driver = MockDriver::new();
        assert_eq!(current_dropdown_value(&mut driver, "Status", &fast()), "Unknown");

        driver.show_texts(dropdown_value("Status"), &["Enabled"]);
        assert_eq!(current_dropdown_value(&mut driver, "Status", &fast()), "Enabled");
    }

    #[test]
    fn listing_options_closes_the_dropdown() {
        let mut driver = dropdown(&["Enabled", "Disabled"]);
        let listed = list_dropdown_options(&mut driver, "Status", &fast()).unwrap();
        assert_eq!(listed, vec!["0: Enabled", "1: Disabled"]);
        assert_eq!(driver.keys_pressed(), vec![Key::Escape]);
    }
}
