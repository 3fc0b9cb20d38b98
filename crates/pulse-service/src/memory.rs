use async_trait::async_trait;
use pulse_core::issue::{Issue, IssueFilter};
use pulse_core::project::Project;

use crate::{ServiceError, TrackerService};

/// In-memory tracker holding a fixed set of assigned issues and projects.
#[derive(Debug, Clone, Default)]
pub struct MemoryService {
    issues: Vec<Issue>,
    projects: Vec<Project>,
}

impl MemoryService {
    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.push(issue);
        self
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }
}

#[async_trait]
impl TrackerService for MemoryService {
    async fn assigned_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>, ServiceError> {
        let mut issues: Vec<Issue> = self
            .issues
            .iter()
            .filter(|issue| filter.matches(issue))
            .cloned()
            .collect();
        issues.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(issues)
    }

    async fn get_project(&self, id: &str) -> Result<Project, ServiceError> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("project {id}")))
    }
}
