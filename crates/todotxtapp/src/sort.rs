//! # Sorting
//!
//! Nine total orders over tasks. Every chain ends in ascending `task_id`, so ties at
//! every explicit key still resolve to exactly one order and repeated sorts of the
//! same input always agree.
//!
//! | Sort | Keys |
//! |------|------|
//! | `InFile` | task_id |
//! | `Priority` | priority, completion, due state, due date, task_id |
//! | `Project` / `Context` | first tag, then the `Priority` chain |
//! | `DueDate` | due date, priority, task_id |
//! | `CreationDate` | creation date, priority, task_id |
//! | `CompletionDate` | completion date, task_id |
//! | `ThresholdDate` | threshold date, priority, task_id |
//! | `Alphabetical` | raw text, task_id |
//!
//! Absent values (no priority, no date, no tag) always sort after present ones.
//! Text keys compare ASCII-case-insensitively.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dates;
use crate::error::{Result, TodoError};
use crate::model::Task;
use crate::store::{keys, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortType {
    #[default]
    InFile,
    Priority,
    Project,
    Context,
    DueDate,
    CreationDate,
    CompletionDate,
    ThresholdDate,
    Alphabetical,
}

impl SortType {
    /// All sort types, in number order.
    pub const ALL: [SortType; 9] = [
        SortType::InFile,
        SortType::Priority,
        SortType::Project,
        SortType::Context,
        SortType::DueDate,
        SortType::CreationDate,
        SortType::CompletionDate,
        SortType::ThresholdDate,
        SortType::Alphabetical,
    ];

    /// Stable number used when persisting the choice.
    pub fn number(self) -> u8 {
        match self {
            SortType::InFile => 0,
            SortType::Priority => 1,
            SortType::Project => 2,
            SortType::Context => 3,
            SortType::DueDate => 4,
            SortType::CreationDate => 5,
            SortType::CompletionDate => 6,
            SortType::ThresholdDate => 7,
            SortType::Alphabetical => 8,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number)).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            SortType::InFile => "in-file",
            SortType::Priority => "priority",
            SortType::Project => "project",
            SortType::Context => "context",
            SortType::DueDate => "due-date",
            SortType::CreationDate => "creation-date",
            SortType::CompletionDate => "completion-date",
            SortType::ThresholdDate => "threshold-date",
            SortType::Alphabetical => "alphabetical",
        }
    }
}

impl fmt::Display for SortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortType {
    type Err = TodoError;

    /// Accepts a name (`due-date` or `due_date`) or a number `0`–`8`.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        if let Ok(number) = wanted.parse::<u8>() {
            return Self::from_number(number)
                .ok_or_else(|| TodoError::InvalidArgument(format!("Unknown sort: {s}")));
        }
        Self::ALL
            .into_iter()
            .find(|sort| sort.name() == wanted)
            .ok_or_else(|| TodoError::InvalidArgument(format!("Unknown sort: {s}")))
    }
}

/// Compares two tasks under `sort`, with due states computed against `today`.
pub fn compare_on(a: &Task, b: &Task, sort: SortType, today: NaiveDate) -> Ordering {
    let primary = match sort {
        SortType::InFile => Ordering::Equal,
        SortType::Priority => by_priority_chain(a, b, today),
        SortType::Project => absent_last_by(
            first_tag(a.projects()),
            first_tag(b.projects()),
            |x, y| cmp_ignore_case(x, y),
        )
        .then_with(|| by_priority_chain(a, b, today)),
        SortType::Context => absent_last_by(
            first_tag(a.contexts()),
            first_tag(b.contexts()),
            |x, y| cmp_ignore_case(x, y),
        )
        .then_with(|| by_priority_chain(a, b, today)),
        SortType::DueDate => {
            absent_last(a.due_date(), b.due_date()).then_with(|| by_priority(a, b))
        }
        SortType::CreationDate => {
            absent_last(a.creation_date(), b.creation_date()).then_with(|| by_priority(a, b))
        }
        SortType::CompletionDate => absent_last(a.completion_date(), b.completion_date()),
        SortType::ThresholdDate => {
            absent_last(a.threshold_date(), b.threshold_date()).then_with(|| by_priority(a, b))
        }
        SortType::Alphabetical => cmp_ignore_case(a.raw_text(), b.raw_text()),
    };
    primary.then_with(|| a.task_id().cmp(&b.task_id()))
}

/// Returns a sorted copy of `tasks`.
pub fn sort_tasks_on(tasks: &[Task], sort: SortType, today: NaiveDate) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sort_in_place_on(&mut sorted, sort, today);
    sorted
}

pub fn sort_tasks(tasks: &[Task], sort: SortType) -> Vec<Task> {
    sort_tasks_on(tasks, sort, dates::today())
}

pub fn sort_in_place_on(tasks: &mut [Task], sort: SortType, today: NaiveDate) {
    tasks.sort_by(|a, b| compare_on(a, b, sort, today));
    debug!(sort = sort.name(), count = tasks.len(), "Sorted tasks");
}

pub fn sort_in_place(tasks: &mut [Task], sort: SortType) {
    sort_in_place_on(tasks, sort, dates::today());
}

/// Reads the persisted sort choice.
///
/// Returns `None` when nothing was saved or the stored value is not a known sort.
pub fn load_sort_type<S: KeyValueStore>(store: &S) -> Result<Option<SortType>> {
    let Some(blob) = store.load(keys::SORT_TYPE)? else {
        return Ok(None);
    };
    let sort = blob.trim().parse::<u8>().ok().and_then(SortType::from_number);
    if sort.is_none() {
        warn!(stored = %blob, "Ignoring unknown stored sort type");
    }
    Ok(sort)
}

pub fn save_sort_type<S: KeyValueStore>(store: &S, sort: SortType) -> Result<()> {
    debug!(sort = sort.name(), "Saving sort type");
    store.save(keys::SORT_TYPE, &sort.number().to_string())
}

/// Priority, then incomplete before complete, then due state, then due date.
fn by_priority_chain(a: &Task, b: &Task, today: NaiveDate) -> Ordering {
    by_priority(a, b)
        .then_with(|| a.is_completed().cmp(&b.is_completed()))
        .then_with(|| a.due_state_on(today).cmp(&b.due_state_on(today)))
        .then_with(|| absent_last(a.due_date(), b.due_date()))
}

fn by_priority(a: &Task, b: &Task) -> Ordering {
    absent_last(a.priority(), b.priority())
}

fn absent_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    absent_last_by(a, b, |x, y| x.cmp(y))
}

fn absent_last_by<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(&x, &y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The smallest tag by case-insensitive order.
fn first_tag(tags: &[String]) -> Option<&str> {
    tags.iter()
        .map(String::as_str)
        .min_by(|x, y| cmp_ignore_case(x, y))
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}
