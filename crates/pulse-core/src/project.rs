use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectState {
    Backlog,
    Planned,
    Started,
    Paused,
    Completed,
    Canceled,
}

impl ProjectState {
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectState::Backlog => "Backlog",
            ProjectState::Planned => "Planned",
            ProjectState::Started => "Started",
            ProjectState::Paused => "Paused",
            ProjectState::Completed => "Completed",
            ProjectState::Canceled => "Canceled",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "backlog" => Some(ProjectState::Backlog),
            "planned" => Some(ProjectState::Planned),
            "started" => Some(ProjectState::Started),
            "paused" => Some(ProjectState::Paused),
            "completed" => Some(ProjectState::Completed),
            "canceled" | "cancelled" => Some(ProjectState::Canceled),
            _ => None,
        }
    }

    /// Only started projects show up in the Active Projects section.
    pub fn is_active(&self) -> bool {
        matches!(self, ProjectState::Started)
    }
}

impl fmt::Display for ProjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    pub state: ProjectState,
}
