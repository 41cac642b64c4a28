//! The eight workflow steps.
//!
//! Each step drives the page through one action and returns a [`StepDone`]
//! carrying the value it produced. Any error propagates to the runner,
//! which turns it into a failure outcome.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::context::edited_username;
use super::outcome::StepStatus;
use super::selection::{
    choose_autocomplete, current_dropdown_value, list_dropdown_options, select_option, Suggestion,
};
use super::surface::*;
use crate::config::{HrflowConfig, Timeouts};
use crate::driver::{appears, wait_visible, Driver, Key, Locator};
use crate::error::{HrflowError, Result};

const EDIT_FORM_SETTLE: Duration = Duration::from_millis(2000);
const RESET_SETTLE: Duration = Duration::from_millis(1000);
const FIELD_SETTLE: Duration = Duration::from_millis(1000);
const STATUS_SETTLE: Duration = Duration::from_millis(1500);
const CHECKBOX_SETTLE: Duration = Duration::from_millis(800);
const SELECTION_SETTLE: Duration = Duration::from_millis(600);
const CONFIRM_SETTLE: Duration = Duration::from_millis(500);

/// A completed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDone<T> {
    /// Context value handed to later steps.
    pub value: T,
    /// Success or Warning.
    pub status: StepStatus,
    pub detail: String,
}

impl<T> StepDone<T> {
    pub fn success(value: T, detail: impl Into<String>) -> Self {
        Self {
            value,
            status: StepStatus::Success,
            detail: detail.into(),
        }
    }

    pub fn warning(value: T, detail: impl Into<String>) -> Self {
        Self {
            value,
            status: StepStatus::Warning,
            detail: detail.into(),
        }
    }
}

fn click_when_visible<D: Driver + ?Sized>(
    driver: &mut D,
    locator: &Locator,
    timeout: Duration,
    timeouts: &Timeouts,
) -> Result<()> {
    let target = locator.first();
    wait_visible(driver, &target, timeout, timeouts.poll())?;
    driver.click(&target)?;
    Ok(())
}

/// Click Reset when the search form offers it.
fn click_reset<D: Driver + ?Sized>(driver: &mut D, timeouts: &Timeouts) -> Result<()> {
    let reset = button("Reset").first();
    if appears(driver, &reset, timeouts.optional(), timeouts.poll())? {
        driver.click(&reset)?;
        driver.pause(RESET_SETTLE);
    }
    Ok(())
}

/// Reset the search form, then search by username.
fn search_for<D: Driver + ?Sized>(driver: &mut D, username: &str, timeouts: &Timeouts) -> Result<()> {
    click_reset(driver, timeouts)?;
    let field = field_input(USERNAME).first();
    wait_visible(driver, &field, timeouts.element(), timeouts.poll())?;
    driver.fill(&field, username)?;
    click_when_visible(driver, &button("Search"), timeouts.element(), timeouts)
}

/// Clear a focused input with Ctrl+A, Delete.
fn clear_field<D: Driver + ?Sized>(driver: &mut D, field: &Locator, timeouts: &Timeouts) -> Result<()> {
    click_when_visible(driver, field, timeouts.element(), timeouts)?;
    driver.press_key(Key::SelectAll)?;
    driver.press_key(Key::Delete)?;
    Ok(())
}

fn pick_employee<D: Driver + ?Sized>(
    driver: &mut D,
    seed: &str,
    config: &HrflowConfig,
) -> Result<()> {
    match choose_autocomplete(driver, seed, &config.timeouts)? {
        Suggestion::Selected => Ok(()),
        Suggestion::Empty if config.policy.require_autocomplete => Err(HrflowError::NoSuggestions {
            seed: seed.to_string(),
            timeout_ms: config.timeouts.suggestion().as_millis(),
        }),
        Suggestion::Empty => {
            warn!("Continuing without an employee for '{}'", seed);
            Ok(())
        }
    }
}

/// Open the login page and sign in as the administrator.
pub fn login<D: Driver + ?Sized>(driver: &mut D, config: &HrflowConfig) -> Result<StepDone<()>> {
    let t = &config.timeouts;
    driver.navigate(&config.target.url)?;

    let username = login_field("username").first();
    wait_visible(driver, &username, t.page(), t.poll())?;
    driver.fill(&username, &config.credentials.username)?;
    driver.fill(&login_field("password").first(), &config.credentials.password)?;
    driver.click(&submit_button().first())?;

    wait_visible(driver, &link("Admin").first(), t.element(), t.poll())?;
    Ok(StepDone::success((), "Logged in successfully."))
}

/// Open the Admin module's System Users page.
pub fn navigate_to_admin<D: Driver + ?Sized>(
    driver: &mut D,
    config: &HrflowConfig,
) -> Result<StepDone<()>> {
    let t = &config.timeouts;
    click_when_visible(driver, &link("Admin"), t.element(), t)?;
    wait_for_system_users(driver, t.page(), t.poll())?;
    Ok(StepDone::success((), "Admin page loaded."))
}

/// Create `username` with the configured role, status and employee.
pub fn add_user<D: Driver + ?Sized>(
    driver: &mut D,
    config: &HrflowConfig,
    username: &str,
) -> Result<StepDone<String>> {
    let t = &config.timeouts;
    let selection = &config.selection;
    info!(
        "Creating user {} (role option {}, status option {})",
        username, selection.add_role_index, selection.add_status_index
    );

    click_when_visible(driver, &button("Add"), t.element(), t)?;
    wait_visible(driver, &heading("h6", ADD_USER_HEADER).first(), t.toast(), t.poll())?;

    let role = select_option(driver, USER_ROLE, selection.add_role_index, t)?;
    pick_employee(driver, &selection.add_employee_seed, config)?;
    let status = select_option(driver, STATUS, selection.add_status_index, t)?;

    let name_field = field_input(USERNAME).first();
    wait_visible(driver, &name_field, t.page(), t.poll())?;
    driver.fill(&name_field, username)?;

    let passwords = password_inputs();
    driver.fill(&passwords.nth(0), &config.user.password)?;
    driver.fill(&passwords.nth(1), &config.user.password)?;

    click_when_visible(driver, &button("Save"), t.element(), t)?;
    wait_visible(driver, &toast().first(), t.toast(), t.poll())?;
    wait_for_system_users(driver, t.page(), t.poll())?;

    Ok(StepDone::success(
        username.to_string(),
        format!(
            "User: {}, Role: {}, Status: {}",
            username, role.label, status.label
        ),
    ))
}

/// Search for `username` and expect it in the results table.
pub fn search_user<D: Driver + ?Sized>(
    driver: &mut D,
    config: &HrflowConfig,
    username: &str,
) -> Result<StepDone<()>> {
    let t = &config.timeouts;
    wait_for_system_users(driver, t.page(), t.poll())?;
    search_for(driver, username, t)?;
    wait_visible(driver, &user_cell(username).first(), t.page(), t.poll())?;
    Ok(StepDone::success((), format!("User {} found.", username)))
}

/// Edit every field of `username`, renaming it. Returns the new username.
pub fn edit_user<D: Driver + ?Sized>(
    driver: &mut D,
    config: &HrflowConfig,
    username: &str,
) -> Result<StepDone<String>> {
    let t = &config.timeouts;
    let selection = &config.selection;
    info!(
        "Editing user {} (role option {}, status option {})",
        username, selection.edit_role_index, selection.edit_status_index
    );

    click_when_visible(driver, &row_edit(username), t.element(), t)?;
    wait_visible(driver, &heading("h6", EDIT_USER_HEADER).first(), t.toast(), t.poll())?;
    driver.pause(EDIT_FORM_SETTLE);

    let current_role = current_dropdown_value(driver, USER_ROLE, t);
    let current_status = current_dropdown_value(driver, STATUS, t);
    debug!("Current state - Role: {}, Status: {}", current_role, current_status);
    for label in [USER_ROLE, STATUS] {
        match list_dropdown_options(driver, label, t) {
            Ok(entries) => debug!("Available {} options: {}", label, entries.join(", ")),
            Err(e) => warn!("Could not list {} options: {}", label, e),
        }
    }

    let role = select_option(driver, USER_ROLE, selection.edit_role_index, t)?;
    driver.pause(FIELD_SETTLE);

    clear_field(driver, &employee_hint(), t)?;
    pick_employee(driver, &selection.edit_employee_seed, config)?;
    driver.pause(FIELD_SETTLE);

    let status = select_option(driver, STATUS, selection.edit_status_index, t)?;
    driver.pause(STATUS_SETTLE);

    let new_username = edited_username(&config.user.edited_prefix, username);
    let name_field = field_input(USERNAME);
    clear_field(driver, &name_field, t)?;
    driver.fill(&name_field.first(), &new_username)?;

    let toggle = change_password_toggle().first();
    wait_visible(driver, &toggle, t.element(), t.poll())?;
    driver.script_click(&toggle)?;
    debug!("Enabled Change Password toggle");

    let passwords = any_password_input();
    wait_visible(driver, &passwords.first(), t.element(), t.poll())?;
    driver.fill(&passwords.nth(0), &config.user.edited_password)?;
    driver.fill(&passwords.nth(1), &config.user.edited_password)?;

    click_when_visible(driver, &button("Save"), t.element(), t)?;
    wait_visible(driver, &toast().first(), t.page(), t.poll())?;
    wait_for_system_users(driver, t.page(), t.poll())?;

    let detail = format!(
        "New user: {}, Role: {}, Status: {}",
        new_username, role.label, status.label
    );
    Ok(StepDone::success(new_username, detail))
}

/// Check that `current` is listed with its new role and status, and that
/// `original` is gone.
pub fn validate_update<D: Driver + ?Sized>(
    driver: &mut D,
    config: &HrflowConfig,
    original: &str,
    current: &str,
) -> Result<StepDone<()>> {
    let t = &config.timeouts;
    search_for(driver, current, t)?;
    wait_visible(driver, &user_cell(current).first(), t.toast(), t.poll())?;

    let old_remains = appears(driver, &user_cell(original).first(), t.optional(), t.poll())?;

    let role_cell = row_column(current, ROLE_COLUMN).first();
    let status_cell = row_column(current, STATUS_COLUMN).first();
    wait_visible(driver, &role_cell, t.toast(), t.poll())?;
    wait_visible(driver, &status_cell, t.toast(), t.poll())?;
    let role = driver.text(&role_cell)?;
    let status = driver.text(&status_cell)?;

    let summary = format!("User: {}, Role: {}, Status: {}", current, role, status);
    if old_remains {
        warn!("Old username {} still listed", original);
        Ok(StepDone::warning((), format!("Old username still exists. {}", summary)))
    } else {
        Ok(StepDone::success((), format!("Old username correctly removed. {}", summary)))
    }
}

/// Select `username`'s row and delete it.
pub fn delete_user<D: Driver + ?Sized>(
    driver: &mut D,
    config: &HrflowConfig,
    username: &str,
) -> Result<StepDone<()>> {
    let t = &config.timeouts;
    search_for(driver, username, t)?;
    wait_visible(driver, &user_cell(username).first(), t.element(), t.poll())?;

    let checkbox = row_checkbox(username).first();
    wait_visible(driver, &checkbox, t.element(), t.poll())?;
    driver.pause(CHECKBOX_SETTLE);
    driver.script_click(&checkbox)?;
    debug!("Checkbox of {} selected", username);
    driver.pause(SELECTION_SETTLE);

    click_when_visible(driver, &button("Delete Selected"), t.element(), t)?;
    driver.pause(CONFIRM_SETTLE);
    click_when_visible(driver, &button("Yes, Delete"), t.element(), t)?;

    wait_visible(driver, &toast().first(), t.page(), t.poll())?;
    wait_for_system_users(driver, t.page(), t.poll())?;
    Ok(StepDone::success((), format!("Deleted {}.", username)))
}

/// Search for `username` and expect no results.
pub fn validate_deletion<D: Driver + ?Sized>(
    driver: &mut D,
    config: &HrflowConfig,
    username: &str,
) -> Result<StepDone<()>> {
    let t = &config.timeouts;
    search_for(driver, username, t)?;
    wait_visible(driver, &no_records().first(), t.toast(), t.poll())?;
    Ok(StepDone::success((), format!("{} no longer present.", username)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{Effect, MockAction, MockDriver};
    use crate::error::FailureKind;

    #[test]
    fn login_fills_credentials_and_waits_for_admin_link() {
        let config = HrflowConfig::default();
        let mut driver = MockDriver::new();
        driver.show(login_field("username"), 1);
        driver.show(login_field("password"), 1);
        driver.show(submit_button(), 1);
        driver.on_click(submit_button(), vec![Effect::show(link("Admin"), 1)]);

        let done = login(&mut driver, &config).unwrap();
        assert_eq!(done.status, StepStatus::Success);
        assert_eq!(
            driver.actions()[0],
            MockAction::Navigate(config.target.url.clone())
        );
        assert_eq!(
            driver.field_value(&login_field("password").first()),
            Some("admin123")
        );
    }

    #[test]
    fn login_failure_is_a_timeout() {
        let config = HrflowConfig::default();
        let mut driver = MockDriver::new();
        driver.show(login_field("username"), 1);
        driver.show(login_field("password"), 1);
        driver.show(submit_button(), 1);

        let err = login(&mut driver, &config).unwrap_err();
        assert_eq!(err.kind(), FailureKind::ElementOrTimeout);
        assert!(err.to_string().contains("Admin"));
    }

    #[test]
    fn unreachable_page_is_a_navigation_failure() {
        let mut driver = MockDriver::new();
        driver.fail_navigation("dns error");
        let err = login(&mut driver, &HrflowConfig::default()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::NetworkOrNavigation);
    }

    #[test]
    fn validate_deletion_expects_no_records() {
        let config = HrflowConfig::default();
        let mut driver = MockDriver::new();
        driver.show(field_input(USERNAME), 1);
        driver.show(button("Search"), 1);
        driver.on_click(button("Search"), vec![Effect::show(no_records(), 1)]);

        let done = validate_deletion(&mut driver, &config, "edited_user_x").unwrap();
        assert_eq!(done.detail, "edited_user_x no longer present.");
        // No Reset button: only the optional-element wait elapses before searching.
        assert_eq!(driver.elapsed(), config.timeouts.optional());
    }

    #[test]
    fn required_autocomplete_fails_without_suggestions() {
        let mut config = HrflowConfig::default();
        config.policy.require_autocomplete = true;
        config.timeouts.suggestion_ms = 200;
        let mut driver = MockDriver::new();
        driver.show(employee_hint(), 1);

        let err = pick_employee(&mut driver, "q", &config).unwrap_err();
        assert!(matches!(err, HrflowError::NoSuggestions { .. }));

        config.policy.require_autocomplete = false;
        assert!(pick_employee(&mut driver, "q", &config).is_ok());
    }
}
