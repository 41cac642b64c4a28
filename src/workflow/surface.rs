//! Locators of the HR admin surface.
//!
//! Everything the steps know about the page layout lives here; the rest of
//! the workflow only handles [`Locator`] values.

use std::time::Duration;

use crate::driver::{wait_visible, Driver, DriverResult, FieldPart, Locator, RowControl};

pub const SYSTEM_USERS: &str = "System Users";
pub const ADD_USER_HEADER: &str = "Add User";
pub const EDIT_USER_HEADER: &str = "Edit User";
pub const USER_ROLE: &str = "User Role";
pub const STATUS: &str = "Status";
pub const USERNAME: &str = "Username";
pub const EMPLOYEE_HINT: &str = "Type for hints...";
pub const NO_RECORDS: &str = "No Records Found";

/// Role column of the results table.
pub const ROLE_COLUMN: usize = 3;
/// Status column of the results table.
pub const STATUS_COLUMN: usize = 5;

/// Login form input by `name` attribute.
pub fn login_field(name: &str) -> Locator {
    Locator::css(format!("input[name='{}']", name))
}

pub fn submit_button() -> Locator {
    Locator::css("button[type='submit']")
}

/// Navigation link by text.
pub fn link(text: &str) -> Locator {
    Locator::has_text("a", text)
}

pub fn button(text: &str) -> Locator {
    Locator::has_text("button", text)
}

/// Page (`h5`) or form (`h6`) heading.
pub fn heading(tag: &str, text: &str) -> Locator {
    Locator::has_text(tag, text)
}

pub fn field_label(label: &str) -> Locator {
    Locator::label(label, FieldPart::Label)
}

pub fn field_input(label: &str) -> Locator {
    Locator::label(label, FieldPart::Input)
}

/// Icon opening the dropdown of a labelled field.
pub fn dropdown_toggle(label: &str) -> Locator {
    Locator::label(label, FieldPart::Toggle)
}

/// Current value shown by a labelled dropdown.
pub fn dropdown_value(label: &str) -> Locator {
    Locator::label(label, FieldPart::Value)
}

/// Entries of the open dropdown or suggestion list.
pub fn options() -> Locator {
    Locator::role("option", Some("listbox"))
}

pub fn employee_hint() -> Locator {
    Locator::Placeholder(EMPLOYEE_HINT.to_string())
}

/// Password and Confirm Password inputs of the add form.
pub fn password_inputs() -> Locator {
    Locator::xpath(
        "//label[text()='Password']/../following-sibling::div//input \
         | //label[text()='Confirm Password']/../following-sibling::div//input",
    )
}

/// Any password input; the edit form renders them unlabelled at first.
pub fn any_password_input() -> Locator {
    Locator::xpath("//input[@type='password']")
}

pub fn change_password_toggle() -> Locator {
    Locator::xpath(
        "//label[contains(.,'Change Password')]/../following-sibling::div//input[@type='checkbox']",
    )
}

/// Confirmation toast shown after saves and deletes.
pub fn toast() -> Locator {
    Locator::css("div.oxd-toast")
}

/// Results-table cell holding `username`.
pub fn user_cell(username: &str) -> Locator {
    Locator::Cell(username.to_string())
}

pub fn row_column(username: &str, column: usize) -> Locator {
    Locator::RowColumn {
        row: username.to_string(),
        column,
    }
}

pub fn row_edit(username: &str) -> Locator {
    Locator::RowControl {
        row: username.to_string(),
        control: RowControl::Edit,
    }
}

pub fn row_checkbox(username: &str) -> Locator {
    Locator::RowControl {
        row: username.to_string(),
        control: RowControl::Select,
    }
}

pub fn no_records() -> Locator {
    Locator::has_text("span", NO_RECORDS)
}

/// Wait until the System Users page and its search form are shown.
pub fn wait_for_system_users<D: Driver + ?Sized>(
    driver: &mut D,
    timeout: Duration,
    poll: Duration,
) -> DriverResult<()> {
    wait_visible(driver, &heading("h5", SYSTEM_USERS).first(), timeout, poll)?;
    wait_visible(driver, &field_label(USERNAME).first(), timeout, poll)
}
