use serde::{Deserialize, Serialize};

/// Which report section a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Completed,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Human-readable identifier, e.g. `ENG-42`.
    pub id: String,
    pub title: String,
    pub url: String,
    /// Name of the owning project, if any.
    #[serde(default)]
    pub project: Option<String>,
}
