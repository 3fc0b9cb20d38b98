use async_trait::async_trait;
use pulse_core::issue::{Issue, IssueFilter};
use pulse_core::project::Project;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Read access to the project tracker.
///
/// `LinearService` talks to the Linear GraphQL API.
/// `MemoryService` serves fixed data for tests and offline runs.
#[async_trait]
pub trait TrackerService: Send + Sync {
    /// Issues assigned to the authenticated user, most recently updated
    /// first.
    async fn assigned_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>, ServiceError>;

    async fn get_project(&self, id: &str) -> Result<Project, ServiceError>;
}
