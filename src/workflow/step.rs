//! The fixed step sequence and the run state machine.

use std::fmt;

/// One workflow action, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Login,
    NavigateToAdmin,
    AddUser,
    SearchUser,
    EditUser,
    ValidateUpdate,
    DeleteUser,
    ValidateDeletion,
}

impl Step {
    /// Every step, in the order the runner executes them.
    pub const ALL: [Step; 8] = [
        Step::Login,
        Step::NavigateToAdmin,
        Step::AddUser,
        Step::SearchUser,
        Step::EditUser,
        Step::ValidateUpdate,
        Step::DeleteUser,
        Step::ValidateDeletion,
    ];

    /// Display name used in logs and the summary.
    pub fn name(self) -> &'static str {
        match self {
            Step::Login => "Login",
            Step::NavigateToAdmin => "Navigate to Admin",
            Step::AddUser => "Add User",
            Step::SearchUser => "Search User",
            Step::EditUser => "Edit User",
            Step::ValidateUpdate => "Validate Update",
            Step::DeleteUser => "Delete User",
            Step::ValidateDeletion => "Validate Deletion",
        }
    }

    /// One-based position in the sequence.
    pub fn position(self) -> usize {
        Step::ALL
            .iter()
            .position(|s| *s == self)
            .map_or(0, |i| i + 1)
    }

    /// File name of the failure screenshot.
    ///
    /// Login and Navigate to Admin capture nothing on failure.
    pub fn screenshot_file(self) -> Option<&'static str> {
        match self {
            Step::Login | Step::NavigateToAdmin => None,
            Step::AddUser => Some("fail_add_user.png"),
            Step::SearchUser => Some("fail_search_user.png"),
            Step::EditUser => Some("fail_edit_user.png"),
            Step::ValidateUpdate => Some("fail_validate_update.png"),
            Step::DeleteUser => Some("fail_delete_user.png"),
            Step::ValidateDeletion => Some("fail_validate_deletion.png"),
        }
    }

    /// Whether a failure of this step stops the run.
    ///
    /// Edit User may let the run continue with the unedited username.
    pub fn halts_on_failure(self, continue_after_edit_failure: bool) -> bool {
        !(self == Step::EditUser && continue_after_edit_failure)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    LoggedIn,
    OnAdminSurface,
    EntityCreated,
    EntityFound,
    EntityEdited,
    UpdateValidated,
    EntityDeleted,
    DeletionValidated,
    /// Terminal: the summary has been produced.
    Reported,
}

impl RunState {
    /// State reached when `step` completes.
    pub fn after(step: Step) -> RunState {
        match step {
            Step::Login => RunState::LoggedIn,
            Step::NavigateToAdmin => RunState::OnAdminSurface,
            Step::AddUser => RunState::EntityCreated,
            Step::SearchUser => RunState::EntityFound,
            Step::EditUser => RunState::EntityEdited,
            Step::ValidateUpdate => RunState::UpdateValidated,
            Step::DeleteUser => RunState::EntityDeleted,
            Step::ValidateDeletion => RunState::DeletionValidated,
        }
    }

    /// The step that leaves this state, if any.
    pub fn next_step(self) -> Option<Step> {
        match self {
            RunState::Init => Some(Step::Login),
            RunState::LoggedIn => Some(Step::NavigateToAdmin),
            RunState::OnAdminSurface => Some(Step::AddUser),
            RunState::EntityCreated => Some(Step::SearchUser),
            RunState::EntityFound => Some(Step::EditUser),
            RunState::EntityEdited => Some(Step::ValidateUpdate),
            RunState::UpdateValidated => Some(Step::DeleteUser),
            RunState::EntityDeleted => Some(Step::ValidateDeletion),
            RunState::DeletionValidated | RunState::Reported => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == RunState::Reported
    }
}
