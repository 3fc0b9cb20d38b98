use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Workflow state category of an issue, independent of the team's
/// custom state names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateType {
    Triage,
    Backlog,
    Unstarted,
    Started,
    Completed,
    Canceled,
}

impl StateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateType::Triage => "triage",
            StateType::Backlog => "backlog",
            StateType::Unstarted => "unstarted",
            StateType::Started => "started",
            StateType::Completed => "completed",
            StateType::Canceled => "canceled",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "triage" => Some(StateType::Triage),
            "backlog" => Some(StateType::Backlog),
            "unstarted" => Some(StateType::Unstarted),
            "started" => Some(StateType::Started),
            "completed" => Some(StateType::Completed),
            "canceled" => Some(StateType::Canceled),
            _ => None,
        }
    }
}

impl fmt::Display for StateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}

/// An issue as returned by the tracker, before it is reduced to a [`Task`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub identifier: String,
    pub title: String,
    pub url: String,
    pub state_type: StateType,
    /// 0 = no priority, 1 = urgent .. 4 = low.
    #[serde(default)]
    pub priority: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub project: Option<ProjectRef>,
}

impl From<Issue> for Task {
    fn from(issue: Issue) -> Self {
        Task {
            id: issue.identifier,
            title: issue.title,
            url: issue.url,
            project: issue.project.map(|p| p.name),
        }
    }
}

/// Query over the viewer's assigned issues. Empty `state_types` means any.
/// Results are always ordered by `updated_at`, most recent first.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    pub updated_after: Option<DateTime<Utc>>,
    pub state_types: Vec<StateType>,
    /// Inclusive priority ceiling; issues without a priority (0) are excluded
    /// whenever a ceiling is set.
    pub max_priority: Option<u8>,
}

impl IssueFilter {
    pub fn matches(&self, issue: &Issue) -> bool {
        if let Some(after) = self.updated_after {
            if issue.updated_at < after {
                return false;
            }
        }
        if !self.state_types.is_empty() && !self.state_types.contains(&issue.state_type) {
            return false;
        }
        if let Some(ceiling) = self.max_priority {
            if issue.priority == 0 || issue.priority > ceiling {
                return false;
            }
        }
        true
    }
}
