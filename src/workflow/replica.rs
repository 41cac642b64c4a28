//! In-memory replica of the admin surface.
//!
//! [`admin_replica`] scripts a [`MockDriver`] so that the whole workflow runs
//! against it end to end: the login form accepts the configured
//! credentials, saving the add form lists the new user, saving the edit form
//! renames it, and deleting it leaves "No Records Found". It backs
//! `run --dry-run` and the workflow tests, which inject failures by blocking
//! individual locators.

use super::context::edited_username;
use super::selection::clamp_option_index;
use super::surface::*;
use crate::config::HrflowConfig;
use crate::driver::{Effect, Locator, MockDriver};

/// Option lists offered by the replica.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaOptions {
    pub roles: Vec<String>,
    pub statuses: Vec<String>,
    /// Suggestions for the employee field; empty means none are offered.
    pub employees: Vec<String>,
}

impl Default for ReplicaOptions {
    fn default() -> Self {
        Self {
            roles: strings(&["-- Select --", "Admin", "ESS"]),
            statuses: strings(&["-- Select --", "Enabled", "Disabled"]),
            employees: strings(&["Anna Smith", "Charlie Carter"]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn show_list(locator: Locator, items: &[String]) -> Effect {
    Effect::Show {
        locator,
        texts: items.to_vec(),
    }
}

/// Label the row will show after choosing `requested` from `items`.
fn chosen(items: &[String], requested: usize) -> String {
    clamp_option_index(requested, items.len())
        .and_then(|i| items.get(i).cloned())
        .unwrap_or_default()
}

/// Show the results row of `username` with its role and status.
fn row_effects(username: &str, role: String, status: String) -> Vec<Effect> {
    vec![
        Effect::show(user_cell(username), 1),
        Effect::show(row_edit(username), 1),
        Effect::show(row_checkbox(username), 1),
        Effect::Show {
            locator: row_column(username, ROLE_COLUMN),
            texts: vec![role],
        },
        Effect::Show {
            locator: row_column(username, STATUS_COLUMN),
            texts: vec![status],
        },
    ]
}

fn hide_row(username: &str) -> Vec<Effect> {
    vec![
        Effect::hide(user_cell(username)),
        Effect::hide(row_edit(username)),
        Effect::hide(row_checkbox(username)),
        Effect::hide(row_column(username, ROLE_COLUMN)),
        Effect::hide(row_column(username, STATUS_COLUMN)),
    ]
}

/// Build a driver replaying the admin surface for `username`.
pub fn admin_replica(config: &HrflowConfig, username: &str, lists: &ReplicaOptions) -> MockDriver {
    let selection = &config.selection;
    let edited = edited_username(&config.user.edited_prefix, username);
    let mut driver = MockDriver::new();

    // Login
    driver.show(login_field("username"), 1);
    driver.show(login_field("password"), 1);
    driver.show(submit_button(), 1);
    driver.on_click_when(
        submit_button(),
        vec![
            (
                login_field("username").first(),
                config.credentials.username.clone(),
            ),
            (
                login_field("password").first(),
                config.credentials.password.clone(),
            ),
        ],
        vec![Effect::show(link("Admin"), 1)],
    );

    // System Users page
    driver.on_click(
        link("Admin"),
        vec![
            Effect::show(heading("h5", SYSTEM_USERS), 1),
            Effect::show(field_label(USERNAME), 1),
            Effect::show(field_input(USERNAME), 1),
            Effect::show(button("Add"), 1),
            Effect::show(button("Reset"), 1),
            Effect::show(button("Search"), 1),
        ],
    );

    // User form
    driver.on_click(
        button("Add"),
        vec![
            Effect::show(heading("h6", ADD_USER_HEADER), 1),
            Effect::show(dropdown_toggle(USER_ROLE), 1),
            Effect::show(dropdown_toggle(STATUS), 1),
            Effect::show(employee_hint(), 1),
            Effect::show(password_inputs(), 2),
            Effect::show(button("Save"), 1),
        ],
    );
    driver.on_click(
        dropdown_toggle(USER_ROLE),
        vec![show_list(options(), &lists.roles)],
    );
    driver.on_click(
        dropdown_toggle(STATUS),
        vec![show_list(options(), &lists.statuses)],
    );
    driver.on_click(options(), vec![Effect::hide(options())]);
    if !lists.employees.is_empty() {
        driver.on_fill(employee_hint(), vec![show_list(options(), &lists.employees)]);
    }

    // Saving the add form lists the new user
    let mut created = vec![Effect::show(toast(), 1)];
    created.extend(row_effects(
        username,
        chosen(&lists.roles, selection.add_role_index),
        chosen(&lists.statuses, selection.add_status_index),
    ));
    driver.on_click_when(
        button("Save"),
        vec![(field_input(USERNAME).first(), username.to_string())],
        created,
    );

    // Edit form
    driver.on_click(
        row_edit(username),
        vec![
            Effect::show(heading("h6", EDIT_USER_HEADER), 1),
            Effect::show_texts(dropdown_value(USER_ROLE), &["Admin"]),
            Effect::show_texts(dropdown_value(STATUS), &["Enabled"]),
            Effect::show(change_password_toggle(), 1),
        ],
    );
    driver.on_click(
        change_password_toggle(),
        vec![Effect::show(any_password_input(), 2)],
    );

    // Saving the edit form renames the row
    let mut renamed = vec![Effect::show(toast(), 1)];
    renamed.extend(hide_row(username));
    renamed.extend(row_effects(
        &edited,
        chosen(&lists.roles, selection.edit_role_index),
        chosen(&lists.statuses, selection.edit_status_index),
    ));
    driver.on_click_when(
        button("Save"),
        vec![(field_input(USERNAME).first(), edited.clone())],
        renamed,
    );

    // Deletion, reachable from either name
    for name in [username, edited.as_str()] {
        driver.on_click(
            row_checkbox(name),
            vec![Effect::show(button("Delete Selected"), 1)],
        );
    }
    driver.on_click(
        button("Delete Selected"),
        vec![Effect::show(button("Yes, Delete"), 1)],
    );
    let mut deleted = vec![
        Effect::show(toast(), 1),
        Effect::show(no_records(), 1),
        Effect::hide(button("Yes, Delete")),
    ];
    deleted.extend(hide_row(username));
    deleted.extend(hide_row(&edited));
    driver.on_click(button("Yes, Delete"), deleted);

    driver
}
