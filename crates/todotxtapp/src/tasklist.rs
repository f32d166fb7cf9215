//! # Task List
//!
//! [`TaskList`] is a todo.txt document without the file: an ordered list of tasks
//! whose positions are their ids. The client reads the file into a string, builds a
//! list with [`TaskList::from_text`], applies changes, and writes
//! [`TaskList::to_text`] back.
//!
//! ## Ids
//!
//! A task's id is its zero-based position. Ids are reassigned whenever tasks are
//! removed or archived, so they are only meaningful against the current state of
//! the list.
//!
//! ## Change Notification
//!
//! Presentation layers register callbacks with [`TaskList::subscribe`]. Every
//! mutating call emits exactly one [`ChangeEvent`] after the change is applied.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use todotxtapp::tasklist::{ChangeEvent, TaskList};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//!
//! let mut list = TaskList::from_text("(A) Call mom\n");
//! list.subscribe(move |event| sink.borrow_mut().push(event.clone()));
//! list.add("Buy milk", None);
//!
//! assert_eq!(*seen.borrow(), vec![ChangeEvent::Added(vec![1])]);
//! ```

use std::fmt;

use chrono::NaiveDate;
use tracing::debug;

use crate::dates;
use crate::error::{Result, TodoError};
use crate::filter::{filter_tasks_on, Predicate};
use crate::metadata::TasklistMetadata;
use crate::model::Task;
use crate::sort::{sort_in_place_on, SortType};

/// What changed in a [`TaskList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// The whole content was replaced.
    Reloaded,
    /// Tasks were appended with these ids.
    Added(Vec<usize>),
    /// These tasks were rewritten in place.
    Updated(Vec<usize>),
    /// This many tasks were removed.
    Removed(usize),
    /// This many completed tasks were moved out for archiving.
    Archived(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// The ending used by `text`: CRLF if any line ends with it.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }
}

type Subscriber = Box<dyn FnMut(&ChangeEvent)>;

#[derive(Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    line_ending: LineEnding,
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for TaskList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskList")
            .field("tasks", &self.tasks)
            .field("line_ending", &self.line_ending)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses file content. A trailing newline does not produce an extra task;
    /// blank lines in the middle are kept as blank tasks so the file round-trips.
    pub fn from_text(text: &str) -> Self {
        let mut list = Self::from_lines(text.lines());
        list.line_ending = LineEnding::detect(text);
        list
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tasks: Vec<Task> = lines
            .into_iter()
            .enumerate()
            .map(|(id, line)| Task::new(line, id))
            .collect();
        debug!(count = tasks.len(), "Loaded task list");
        Self {
            tasks,
            ..Self::default()
        }
    }

    /// Replaces the content, keeping subscribers.
    pub fn reload(&mut self, text: &str) {
        let fresh = Self::from_text(text);
        self.tasks = fresh.tasks;
        self.line_ending = fresh.line_ending;
        self.notify(ChangeEvent::Reloaded);
    }

    /// File content: one line per task, each terminated by the list's line ending.
    pub fn to_text(&self) -> String {
        let ending = self.line_ending.as_str();
        let mut text = String::new();
        for task in &self.tasks {
            text.push_str(task.raw_text());
            text.push_str(ending);
        }
        text
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: usize) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Appends one task per non-empty line of `raw_lines` and returns their ids.
    ///
    /// With `prepend_date`, tasks without a creation date get that one.
    pub fn add(&mut self, raw_lines: &str, prepend_date: Option<NaiveDate>) -> Vec<usize> {
        let mut ids = Vec::new();
        for line in raw_lines.lines().filter(|line| !line.trim().is_empty()) {
            let id = self.tasks.len();
            let task = match prepend_date {
                Some(date) => Task::with_creation_date(line, id, date),
                None => Task::new(line, id),
            };
            debug!(id, line = task.raw_text(), "Added task");
            self.tasks.push(task);
            ids.push(id);
        }
        self.notify(ChangeEvent::Added(ids.clone()));
        ids
    }

    /// Removes the tasks with these ids and renumbers the rest. Unknown ids are
    /// ignored. Returns how many tasks were removed.
    pub fn remove(&mut self, ids: &[usize]) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !ids.contains(&task.task_id()));
        let removed = before - self.tasks.len();
        self.renumber();
        debug!(removed, "Removed tasks");
        self.notify(ChangeEvent::Removed(removed));
        removed
    }

    /// Applies `f` once to each selected task, in the order given. Repeated ids are skipped.
    ///
    /// All ids are checked before anything changes. If `f` fails, the error is
    /// returned and the tasks already visited keep their changes.
    pub fn update<F>(&mut self, ids: &[usize], mut f: F) -> Result<()>
    where
        F: FnMut(&mut Task) -> Result<()>,
    {
        if let Some(missing) = ids.iter().find(|id| **id >= self.tasks.len()) {
            return Err(TodoError::InvalidArgument(format!(
                "No task with id {missing}"
            )));
        }

        let mut updated = Vec::with_capacity(ids.len());
        let mut outcome = Ok(());
        for &id in ids {
            if updated.contains(&id) {
                continue;
            }
            if let Err(err) = f(&mut self.tasks[id]) {
                outcome = Err(err);
                break;
            }
            updated.push(id);
        }
        debug!(?updated, "Updated tasks");
        self.notify(ChangeEvent::Updated(updated));
        outcome
    }

    /// Removes completed tasks and returns their lines, in file order, for the
    /// caller to append to an archive.
    pub fn archive_completed(&mut self) -> Vec<String> {
        let (done, open): (Vec<Task>, Vec<Task>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(Task::is_completed);
        self.tasks = open;
        self.renumber();
        let lines: Vec<String> = done.iter().map(|task| task.raw_text().to_string()).collect();
        debug!(archived = lines.len(), "Archived completed tasks");
        self.notify(ChangeEvent::Archived(lines.len()));
        lines
    }

    /// The tasks matching `predicate`, ordered by `sort`.
    pub fn view_on(&self, sort: SortType, predicate: &Predicate, today: NaiveDate) -> Vec<Task> {
        let mut shown = filter_tasks_on(&self.tasks, predicate, today);
        sort_in_place_on(&mut shown, sort, today);
        shown
    }

    pub fn view(&self, sort: SortType, predicate: &Predicate) -> Vec<Task> {
        self.view_on(sort, predicate, dates::today())
    }

    pub fn metadata_on(&self, today: NaiveDate) -> TasklistMetadata {
        TasklistMetadata::from_tasks_on(&self.tasks, today)
    }

    pub fn metadata(&self) -> TasklistMetadata {
        self.metadata_on(dates::today())
    }

    /// Statistics over the tasks `predicate` lets through.
    pub fn filtered_metadata_on(&self, predicate: &Predicate, today: NaiveDate) -> TasklistMetadata {
        let shown = filter_tasks_on(&self.tasks, predicate, today);
        TasklistMetadata::from_tasks_on(&shown, today)
    }

    pub fn filtered_metadata(&self, predicate: &Predicate) -> TasklistMetadata {
        self.filtered_metadata_on(predicate, dates::today())
    }

    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&ChangeEvent) + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    fn notify(&mut self, event: ChangeEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
    }

    fn renumber(&mut self) {
        for (id, task) in self.tasks.iter_mut().enumerate() {
            task.set_task_id(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn recorder(list: &mut TaskList) -> Rc<RefCell<Vec<ChangeEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        list.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        seen
    }

    fn raw(list: &TaskList) -> Vec<&str> {
        list.tasks().iter().map(Task::raw_text).collect()
    }

    #[test]
    fn from_text_has_no_phantom_task() {
        let list = TaskList::from_text("a\nb\n");
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).unwrap().task_id(), 1);
    }

    #[test]
    fn empty_text_is_empty_list() {
        let list = TaskList::from_text("");
        assert!(list.is_empty());
        assert_eq!(list.to_text(), "");
    }

    #[test]
    fn text_round_trips_with_blank_lines() {
        let text = "(A) one\n\nx two\n";
        assert_eq!(TaskList::from_text(text).to_text(), text);
    }

    #[test]
    fn crlf_is_preserved() {
        let text = "one\r\ntwo\r\n";
        let list = TaskList::from_text(text);
        assert_eq!(list.line_ending(), LineEnding::CrLf);
        assert_eq!(raw(&list), vec!["one", "two"]);
        assert_eq!(list.to_text(), text);
    }

    #[test]
    fn missing_final_newline_is_added() {
        assert_eq!(TaskList::from_text("one\ntwo").to_text(), "one\ntwo\n");
    }

    #[test]
    fn add_assigns_following_ids() {
        let mut list = TaskList::from_text("one\n");
        let ids = list.add("two\n\nthree", None);
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(raw(&list), vec!["one", "two", "three"]);
    }

    #[test]
    fn add_with_prepended_date() {
        let mut list = TaskList::new();
        list.add("(A) Pay\n2024-01-01 Dated", Some(d(2024, 6, 1)));
        assert_eq!(raw(&list), vec!["(A) 2024-06-01 Pay", "2024-01-01 Dated"]);
    }

    #[test]
    fn remove_renumbers() {
        let mut list = TaskList::from_text("a\nb\nc\nd\n");
        assert_eq!(list.remove(&[1, 3, 9]), 2);
        assert_eq!(raw(&list), vec!["a", "c"]);
        assert_eq!(list.get(1).unwrap().task_id(), 1);
    }

    #[test]
    fn update_applies_mutator() {
        let mut list = TaskList::from_text("a\nb\n");
        list.update(&[1], |task| task.set_priority('B')).unwrap();
        assert_eq!(raw(&list), vec!["a", "(B) b"]);
    }

    #[test]
    fn update_applies_once_per_repeated_id() {
        let mut list = TaskList::from_text("(C) a\nb\n");
        let mut calls = 0;
        list.update(&[0, 0, 0], |task| {
            calls += 1;
            task.increase_priority();
            Ok(())
        })
        .unwrap();
        assert_eq!(calls, 1);
        assert_eq!(raw(&list), vec!["(B) a", "b"]);
    }

    #[test]
    fn update_checks_ids_first() {
        let mut list = TaskList::from_text("a\nb\n");
        let err = list.update(&[0, 5], |task| task.set_priority('B'));
        assert!(matches!(err, Err(TodoError::InvalidArgument(_))));
        assert_eq!(raw(&list), vec!["a", "b"]);
    }

    #[test]
    fn update_stops_at_first_error() {
        let mut list = TaskList::from_text("a\nb\nc\n");
        let mut calls = 0;
        let result = list.update(&[0, 1, 2], |task| {
            calls += 1;
            if task.raw_text() == "b" {
                task.set_priority('1')
            } else {
                task.set_priority('C')
            }
        });
        assert!(result.is_err());
        assert_eq!(calls, 2);
        assert_eq!(raw(&list), vec!["(C) a", "b", "c"]);
    }

    #[test]
    fn archive_moves_completed_out() {
        let mut list = TaskList::from_text("x 2024-01-01 done\nopen\nx also done\nlast\n");
        let archived = list.archive_completed();
        assert_eq!(archived, vec!["x 2024-01-01 done", "x also done"]);
        assert_eq!(raw(&list), vec!["open", "last"]);
        assert_eq!(list.get(1).unwrap().task_id(), 1);
    }

    #[test]
    fn view_filters_then_sorts() {
        let list = TaskList::from_text("(B) b\nx (A) done\n(A) a\nc\n");
        let open = Predicate::not(Predicate::eq(
            "completed",
            crate::attributes::AttrValue::Bool(true),
        ));
        let shown = list.view_on(SortType::Priority, &open, d(2024, 6, 1));
        let ids: Vec<_> = shown.iter().map(Task::task_id).collect();
        assert_eq!(ids, vec![2, 0, 3]);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn filtered_metadata_counts_shown_tasks() {
        let list = TaskList::from_text("a +p\nb +q\nc +p\n");
        let only_p = Predicate::any_of("projects", &["p"]);
        let meta = list.filtered_metadata_on(&only_p, d(2024, 6, 1));
        assert_eq!(meta.total_task_count, 2);
        assert_eq!(list.metadata_on(d(2024, 6, 1)).total_task_count, 3);
    }

    #[test]
    fn every_mutation_notifies() {
        let mut list = TaskList::from_text("x done\nopen\n");
        let seen = recorder(&mut list);

        list.add("new", None);
        list.update(&[1], |task| {
            task.mark_complete_on(d(2024, 6, 1));
            Ok(())
        })
        .unwrap();
        list.remove(&[2]);
        list.archive_completed();
        list.reload("fresh\n");

        assert_eq!(
            *seen.borrow(),
            vec![
                ChangeEvent::Added(vec![2]),
                ChangeEvent::Updated(vec![1]),
                ChangeEvent::Removed(1),
                ChangeEvent::Archived(2),
                ChangeEvent::Reloaded,
            ]
        );
        assert_eq!(raw(&list), vec!["fresh"]);
    }
}
