//! # Filtering
//!
//! Filters are [`Predicate`] trees: attribute tests (equality, substring, date
//! relation, set membership) combined with AND/OR/NOT. They are plain data, so
//! they can be built in code, saved as presets and evaluated any number of times.
//!
//! The list a user sees is filtered by two predicates at once: the active preset
//! and the live search box. [`combine`] joins them.
//!
//! - [`predicate`]: the tree and its evaluator
//! - [`search`]: query string to predicate
//! - [`presets`]: nine numbered presets and the active slot over a key/value store

pub mod predicate;
pub mod presets;
pub mod search;

pub use predicate::{evaluate, evaluate_on, CompareOp, DateRef, MemberMode, Predicate, Relation};
pub use presets::{decode_predicate, encode_predicate, FilterPresets, PresetBlob, PRESET_COUNT};
pub use search::search_predicate;

use chrono::NaiveDate;
use tracing::debug;

use crate::dates;
use crate::model::Task;

/// The predicate for a preset and a search together.
pub fn combine(preset: Predicate, search: Predicate) -> Predicate {
    Predicate::And(vec![preset, search])
}

/// Tasks matching `predicate`, in input order.
pub fn filter_tasks_on(tasks: &[Task], predicate: &Predicate, today: NaiveDate) -> Vec<Task> {
    let matched: Vec<Task> = tasks
        .iter()
        .filter(|task| predicate.matches_on(task, today))
        .cloned()
        .collect();
    debug!(
        total = tasks.len(),
        matched = matched.len(),
        "Filtered tasks"
    );
    matched
}

pub fn filter_tasks(tasks: &[Task], predicate: &Predicate) -> Vec<Task> {
    filter_tasks_on(tasks, predicate, dates::today())
}
