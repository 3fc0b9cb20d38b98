//! Report documents built from ranked projects and grouped tasks.
//!
//! `markdown` and `html` are independent renderers over the same
//! [`ReportData`]; both walk projects in ranked order and task buckets in
//! `GroupedTasks` key order.

pub mod html;
pub mod markdown;

use chrono::NaiveDate;
use pulse_core::grouping::GroupedTasks;
use pulse_core::ranking::RankedProject;

pub const REPORT_TITLE: &str = "Weekly Report";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportData {
    /// Date the report was evaluated on.
    pub week_of: NaiveDate,
    pub projects: Vec<RankedProject>,
    pub tasks: GroupedTasks,
}

impl ReportData {
    pub fn new(week_of: NaiveDate, projects: Vec<RankedProject>, tasks: GroupedTasks) -> Self {
        Self {
            week_of,
            projects,
            tasks,
        }
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            week_of: self.week_of,
            active_projects: self.projects.len(),
            project_keys: self.tasks.len(),
            tasks: self.tasks.task_count(),
        }
    }
}

/// Counts logged after a report is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub week_of: NaiveDate,
    pub active_projects: usize,
    pub project_keys: usize,
    pub tasks: usize,
}
