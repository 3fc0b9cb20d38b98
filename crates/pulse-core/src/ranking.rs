use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::project::Project;
use crate::workdays::work_days_remaining;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedProject {
    pub project: Project,
    /// `None` when the project has no target date.
    pub remaining_work_days: Option<i64>,
}

impl RankedProject {
    pub fn new(project: Project, today: NaiveDate) -> Self {
        let remaining_work_days = project
            .target_date
            .map(|target| work_days_remaining(today, target));
        Self {
            project,
            remaining_work_days,
        }
    }
}

/// Order projects by urgency: fewest remaining work days first, projects
/// without a deadline last. Ties keep their input order.
pub fn rank_projects(projects: Vec<Project>, today: NaiveDate) -> Vec<RankedProject> {
    let mut ranked: Vec<RankedProject> = projects
        .into_iter()
        .map(|p| RankedProject::new(p, today))
        .collect();
    ranked.sort_by_key(|r| match r.remaining_work_days {
        Some(days) => (false, days),
        None => (true, 0),
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectState;

    fn today() -> NaiveDate {
        // Monday
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn project(name: &str, target: Option<NaiveDate>) -> Project {
        Project {
            id: format!("id-{name}"),
            name: name.into(),
            description: String::new(),
            url: format!("https://linear.app/acme/project/{name}"),
            start_date: None,
            target_date: target,
            state: ProjectState::Started,
        }
    }

    /// Target date that lands exactly `work_days` work days after Monday `today()`.
    fn in_work_days(work_days: i64) -> NaiveDate {
        let mut date = today();
        while work_days_remaining(today(), date) < work_days {
            date = date.succ_opt().unwrap();
        }
        date
    }

    #[test]
    fn deadlines_ascending_then_undated() {
        let projects = vec![
            project("five", Some(in_work_days(5))),
            project("none-a", None),
            project("two", Some(in_work_days(2))),
            project("none-b", None),
            project("zero", Some(today())),
        ];
        let ranked = rank_projects(projects, today());
        let days: Vec<_> = ranked.iter().map(|r| r.remaining_work_days).collect();
        assert_eq!(days, vec![Some(0), Some(2), Some(5), None, None]);
    }

    #[test]
    fn undated_projects_keep_input_order() {
        let projects = vec![
            project("b", None),
            project("a", None),
            project("soon", Some(in_work_days(1))),
        ];
        let ranked = rank_projects(projects, today());
        let names: Vec<_> = ranked.iter().map(|r| r.project.name.as_str()).collect();
        assert_eq!(names, vec!["soon", "b", "a"]);
    }

    #[test]
    fn past_target_dates_count_as_distance() {
        let overdue = NaiveDate::from_ymd_opt(2023, 12, 29).unwrap();
        let ranked = rank_projects(vec![project("late", Some(overdue))], today());
        assert_eq!(ranked[0].remaining_work_days, Some(1));
    }

    #[test]
    fn empty_input() {
        assert!(rank_projects(Vec::new(), today()).is_empty());
    }
}
