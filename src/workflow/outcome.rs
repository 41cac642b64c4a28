//! Step outcomes and the append-only outcome log.

use std::fmt;

use super::step::Step;
use crate::ui::StatusKind;

/// Result class of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Success,
    Failure,
    Warning,
}

impl StepStatus {
    /// Emoji marker printed in the summary.
    pub fn marker(self) -> &'static str {
        match self {
            StepStatus::Success => "✅",
            StepStatus::Failure => "❌",
            StepStatus::Warning => "⚠️",
        }
    }

    /// Matching status icon for terminal output.
    pub fn kind(self) -> StatusKind {
        match self {
            StepStatus::Success => StatusKind::Success,
            StepStatus::Failure => StatusKind::Failed,
            StepStatus::Warning => StatusKind::Warning,
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Recorded result of one executed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: Step,
    pub status: StepStatus,
    pub detail: String,
}

impl StepOutcome {
    pub fn new(step: Step, status: StepStatus, detail: impl Into<String>) -> Self {
        Self {
            step,
            status,
            detail: detail.into(),
        }
    }
}

/// Outcomes in execution order. Entries are never reordered or changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeLog {
    entries: Vec<StepOutcome>,
}

impl OutcomeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome.
    pub fn record(&mut self, outcome: StepOutcome) {
        self.entries.push(outcome);
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepOutcome> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&StepOutcome> {
        self.entries.last()
    }

    /// Number of Success outcomes. Warnings do not count as passed.
    pub fn passed(&self) -> usize {
        self.entries
            .iter()
            .filter(|o| o.status == StepStatus::Success)
            .count()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// True when at least one step ran and every step succeeded.
    pub fn all_passed(&self) -> bool {
        self.total() > 0 && self.passed() == self.total()
    }

    /// Steps in recorded order.
    pub fn steps(&self) -> Vec<Step> {
        self.entries.iter().map(|o| o.step).collect()
    }
}
