pub mod grouping;
pub mod issue;
pub mod project;
pub mod ranking;
pub mod task;
pub mod workdays;

pub use grouping::{group_tasks, GroupedTasks, ProjectKey, NO_PROJECT};
pub use issue::{Issue, IssueFilter, ProjectRef, StateType};
pub use project::{Project, ProjectState};
pub use ranking::{rank_projects, RankedProject};
pub use task::{Task, TaskStatus};
pub use workdays::work_days_remaining;
