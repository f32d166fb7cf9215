//! Task list statistics.
//!
//! [`TasklistMetadata`] is a snapshot computed in one pass over a task collection:
//! completion and due-state counts plus project, context and priority inventories.
//! It is recomputed from scratch whenever the list changes and carries no state
//! between computations.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::dates;
use crate::model::{DueState, Task};

/// One entry of a tag inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TasklistMetadata {
    pub total_task_count: usize,
    pub completed_task_count: usize,
    pub incomplete_task_count: usize,
    /// Incomplete tasks due today.
    pub due_today_task_count: usize,
    /// Incomplete tasks past their due date.
    pub overdue_task_count: usize,
    /// Incomplete tasks with no due date or a future one.
    pub not_due_task_count: usize,
    /// Projects with the number of tasks tagged with each, sorted by name.
    pub projects: Vec<TagCount>,
    pub contexts: Vec<TagCount>,
    /// Priority letters in use, `A` first.
    pub priorities: Vec<TagCount>,
}

impl TasklistMetadata {
    pub fn from_tasks_on(tasks: &[Task], today: NaiveDate) -> Self {
        let mut meta = Self::default();
        let mut projects: HashMap<&str, usize> = HashMap::new();
        let mut contexts: HashMap<&str, usize> = HashMap::new();
        let mut priorities: HashMap<String, usize> = HashMap::new();

        for task in tasks {
            meta.total_task_count += 1;
            if task.is_completed() {
                meta.completed_task_count += 1;
            } else {
                meta.incomplete_task_count += 1;
                match task.due_state_on(today) {
                    DueState::Overdue => meta.overdue_task_count += 1,
                    DueState::DueToday => meta.due_today_task_count += 1,
                    DueState::NotDue => meta.not_due_task_count += 1,
                }
            }
            for project in task.projects() {
                *projects.entry(project.as_str()).or_default() += 1;
            }
            for context in task.contexts() {
                *contexts.entry(context.as_str()).or_default() += 1;
            }
            if let Some(priority) = task.priority() {
                *priorities.entry(priority.to_string()).or_default() += 1;
            }
        }

        meta.projects = inventory(projects);
        meta.contexts = inventory(contexts);
        meta.priorities = inventory(priorities);
        debug!(
            total = meta.total_task_count,
            projects = meta.projects.len(),
            contexts = meta.contexts.len(),
            "Aggregated task list metadata"
        );
        meta
    }

    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self::from_tasks_on(tasks, dates::today())
    }

    /// Number of distinct projects.
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    pub fn priority_count(&self) -> usize {
        self.priorities.len()
    }

    /// How many tasks carry project `name` (exact match).
    pub fn project_tasks(&self, name: &str) -> usize {
        count_of(&self.projects, name)
    }

    pub fn context_tasks(&self, name: &str) -> usize {
        count_of(&self.contexts, name)
    }

    pub fn priority_tasks(&self, priority: char) -> usize {
        count_of(&self.priorities, &priority.to_string())
    }
}

fn inventory<K: AsRef<str>>(counts: HashMap<K, usize>) -> Vec<TagCount> {
    let mut entries: Vec<TagCount> = counts
        .into_iter()
        .map(|(name, count)| TagCount {
            name: name.as_ref().to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    entries
}

fn count_of(entries: &[TagCount], name: &str) -> usize {
    entries
        .iter()
        .find(|entry| entry.name == name)
        .map_or(0, |entry| entry.count)
}
