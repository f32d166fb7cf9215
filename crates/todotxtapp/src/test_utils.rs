//! Helpers shared by tests, here and in client crates (`test_utils` feature).

use chrono::NaiveDate;

use crate::filter::FilterPresets;
use crate::model::Task;
use crate::store::MemStore;

/// Builds a date, panicking on impossible ones.
pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid test date")
}

/// Parses `lines` with ids equal to their positions.
pub fn tasks(lines: &[&str]) -> Vec<Task> {
    lines
        .iter()
        .enumerate()
        .map(|(id, line)| Task::new(*line, id))
        .collect()
}

/// The ids of `tasks`, in order.
pub fn ids(tasks: &[Task]) -> Vec<usize> {
    tasks.iter().map(Task::task_id).collect()
}

/// The "today" the fixtures below are written against.
pub fn fixture_today() -> NaiveDate {
    d(2024, 6, 1)
}

/// Ten tasks relative to [`fixture_today`]: three overdue, two due today, five
/// not due; `+bills` on four of them and `+home` on six.
pub fn metadata_fixture() -> Vec<Task> {
    tasks(&[
        "Pay rent +bills due:2024-05-01",
        "Pay water +bills due:2024-05-20",
        "Fix sink +home due:2024-05-31",
        "Pay power +bills due:2024-06-01",
        "Sweep +home due:2024-06-01",
        "(A) Pay phone +bills",
        "Paint fence +home due:2024-07-01",
        "Clean gutters +home",
        "(B) Water plants +home @garden",
        "Mow lawn +home t:2024-06-10",
    ])
}

/// A store with its preset handle, for tests that need both.
pub struct TestEnv {
    pub store: MemStore,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            store: MemStore::new(),
        }
    }

    pub fn presets(&self) -> FilterPresets<&MemStore> {
        FilterPresets::new(&self.store)
    }
}
