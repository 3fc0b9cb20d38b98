use chrono::{DateTime, Duration, Utc};
use pulse_core::issue::{IssueFilter, StateType};
use pulse_core::project::Project;
use pulse_core::task::Task;
use tracing::{debug, info};

use crate::{ServiceError, TrackerService};

/// How far back "completed" reaches and which priorities count as upcoming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindow {
    pub lookback_days: i64,
    /// Highest priority number (1 = urgent, 4 = low) included in upcoming.
    pub priority_ceiling: u8,
}

impl Default for ActivityWindow {
    fn default() -> Self {
        Self {
            lookback_days: 7,
            priority_ceiling: 2,
        }
    }
}

/// Everything the report needs from the tracker, before ranking and grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activity {
    pub projects: Vec<Project>,
    pub completed: Vec<Task>,
    pub upcoming: Vec<Task>,
}

/// Fetch completed tasks, upcoming tasks and active projects, one request
/// after another.
pub async fn collect_activity(
    service: &dyn TrackerService,
    now: DateTime<Utc>,
    window: &ActivityWindow,
) -> Result<Activity, ServiceError> {
    let completed_filter = IssueFilter {
        updated_after: Some(lookback_start(now, window.lookback_days)?),
        state_types: vec![StateType::Completed],
        max_priority: None,
    };
    let completed: Vec<Task> = service
        .assigned_issues(&completed_filter)
        .await?
        .into_iter()
        .map(Task::from)
        .collect();
    info!(
        "{} tasks completed in the last {} days",
        completed.len(),
        window.lookback_days
    );

    let upcoming_filter = IssueFilter {
        updated_after: None,
        state_types: vec![StateType::Unstarted, StateType::Started],
        max_priority: Some(window.priority_ceiling),
    };
    let upcoming: Vec<Task> = service
        .assigned_issues(&upcoming_filter)
        .await?
        .into_iter()
        .map(Task::from)
        .collect();
    info!("{} upcoming tasks", upcoming.len());

    let projects = active_projects(service).await?;
    info!("{} active projects", projects.len());

    Ok(Activity {
        projects,
        completed,
        upcoming,
    })
}

/// Start of the completed-task window. The lookback must be at least one
/// day and the result must be a representable timestamp.
fn lookback_start(now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>, ServiceError> {
    if days < 1 {
        return Err(ServiceError::InvalidInput(format!(
            "lookback must be at least one day, got {days}"
        )));
    }
    Duration::try_days(days)
        .and_then(|span| now.checked_sub_signed(span))
        .ok_or_else(|| {
            ServiceError::InvalidInput(format!("lookback of {days} days is out of range"))
        })
}

/// Started projects that own at least one of the viewer's open issues,
/// in first-seen order.
async fn active_projects(service: &dyn TrackerService) -> Result<Vec<Project>, ServiceError> {
    let open_filter = IssueFilter {
        state_types: vec![StateType::Backlog, StateType::Unstarted, StateType::Started],
        ..Default::default()
    };
    let open = service.assigned_issues(&open_filter).await?;

    let mut seen: Vec<String> = Vec::new();
    for issue in &open {
        if let Some(project) = &issue.project {
            if !seen.contains(&project.id) {
                seen.push(project.id.clone());
            }
        }
    }

    let mut projects = Vec::new();
    for id in seen {
        let project = service.get_project(&id).await?;
        if project.state.is_active() {
            projects.push(project);
        } else {
            debug!("skipping project {} ({})", project.name, project.state);
        }
    }
    Ok(projects)
}
