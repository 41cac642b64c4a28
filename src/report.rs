//! End-of-run summary.
//!
//! [`RunReport`] is produced by the runner whatever happened during the run
//! and renders the outcome log as a table followed by the verdict.

use chrono::{DateTime, Local};

use crate::ui::Table;
use crate::workflow::{OutcomeLog, RunState, WorkflowContext};

const RULE_WIDTH: usize = 70;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything known at the end of a run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcomes: OutcomeLog,
    pub context: WorkflowContext,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    /// Last state reached before the summary.
    pub reached: RunState,
    /// Always [`RunState::Reported`] once the report exists.
    pub state: RunState,
}

impl RunReport {
    /// Report for a run whose browser session never opened.
    pub fn not_started(started_at: DateTime<Local>) -> Self {
        Self {
            outcomes: OutcomeLog::new(),
            context: WorkflowContext::default(),
            started_at,
            finished_at: Local::now(),
            reached: RunState::Init,
            state: RunState::Reported,
        }
    }

    pub fn passed(&self) -> usize {
        self.outcomes.passed()
    }

    pub fn total(&self) -> usize {
        self.outcomes.total()
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.all_passed()
    }

    /// "P/T tests passed".
    pub fn tally(&self) -> String {
        format!("{}/{} tests passed", self.passed(), self.total())
    }

    pub fn verdict(&self) -> &'static str {
        if self.all_passed() {
            "🎉 ALL TESTS PASSED"
        } else {
            "⚠️ Some tests failed - Check logs for details"
        }
    }

    /// Full plain-text summary.
    pub fn render(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);

        let mut table = Table::new(vec!["Step", "Status", "Detail"]);
        for outcome in self.outcomes.iter() {
            table.add_row(vec![
                outcome.step.name(),
                outcome.status.marker(),
                outcome.detail.as_str(),
            ]);
        }

        [
            String::new(),
            rule.clone(),
            "📊 TEST EXECUTION SUMMARY".to_string(),
            rule.clone(),
            table.render(),
            String::new(),
            rule.clone(),
            format!("⏰ Started at: {}", self.started_at.format(TIMESTAMP_FORMAT)),
            format!("🏁 Completed at: {}", self.finished_at.format(TIMESTAMP_FORMAT)),
            format!("📈 Results: {}", self.tally()),
            self.verdict().to_string(),
            rule,
        ]
        .join("\n")
    }
}
