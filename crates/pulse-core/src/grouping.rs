use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use crate::task::{Task, TaskStatus};

/// Label used for tasks that are not attached to any project.
pub const NO_PROJECT: &str = "no project";

/// Bucket key for grouped tasks. Named projects order by name
/// (case-sensitive, byte-wise); `Unassigned` always sorts last.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectKey {
    Named(String),
    Unassigned,
}

impl ProjectKey {
    pub fn for_task(task: &Task) -> Self {
        match &task.project {
            Some(name) => ProjectKey::Named(name.clone()),
            None => ProjectKey::Unassigned,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ProjectKey::Named(name) => name,
            ProjectKey::Unassigned => NO_PROJECT,
        }
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tasks bucketed by project and then by status.
///
/// A status entry exists for a project only if at least one task of that
/// status was grouped under it, so "absent" and "no tasks" mean the same
/// thing and empty buckets are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedTasks {
    buckets: BTreeMap<ProjectKey, BTreeMap<TaskStatus, Vec<Task>>>,
}

impl GroupedTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, status: TaskStatus, task: Task) {
        self.buckets
            .entry(ProjectKey::for_task(&task))
            .or_default()
            .entry(status)
            .or_default()
            .push(task);
    }

    /// Project keys (in report order) that have a bucket for `status`,
    /// paired with that bucket.
    pub fn keys_with(&self, status: TaskStatus) -> impl Iterator<Item = (&ProjectKey, &[Task])> {
        self.buckets.iter().filter_map(move |(key, by_status)| {
            by_status.get(&status).map(|tasks| (key, tasks.as_slice()))
        })
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ProjectKey, BTreeMap<TaskStatus, Vec<Task>>> {
        self.buckets.iter()
    }

    /// Number of project keys.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn task_count(&self) -> usize {
        self.buckets
            .values()
            .flat_map(|by_status| by_status.values())
            .map(Vec::len)
            .sum()
    }
}

/// Bucket completed and upcoming tasks by project, keeping source order
/// inside every bucket.
pub fn group_tasks(completed: Vec<Task>, upcoming: Vec<Task>) -> GroupedTasks {
    let mut grouped = GroupedTasks::new();
    for task in completed {
        grouped.push(TaskStatus::Completed, task);
    }
    for task in upcoming {
        grouped.push(TaskStatus::Upcoming, task);
    }
    grouped
}
