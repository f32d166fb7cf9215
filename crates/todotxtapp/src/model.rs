//! # Domain Model: One Task, One Line
//!
//! This module defines [`Task`], the structured view of a single todo.txt line, and the
//! derived [`DueState`] and [`ThresholdState`] classifications.
//!
//! ## The Problem
//!
//! todo.txt is written by hand, by scripts, and by a dozen different apps:
//! - Priorities show up in lower case, or glued to the text.
//! - Dates are typed as `2024-1-5`, or as `2024-02-30`.
//! - Tags sit anywhere in the line, sometimes twice.
//!
//! Rejecting any of that would mean rejecting the user's data. So the parser is
//! **lenient**: whatever does not match the grammar exactly is plain text, kept
//! byte for byte.
//!
//! ## The Canonical Layout
//!
//! ```text
//! x 2024-06-01 (A) 2024-01-01 Pay +bills @home due:2024-01-10
//! │ │          │   │          └─ free text (tags and key:value tokens stay in place)
//! │ │          │   └─ creation date
//! │ │          └─ priority
//! │ └─ completion date
//! └─ completion marker
//! ```
//!
//! ## Raw Text Is the Source of Truth
//!
//! A [`Task`] stores its raw line and the attributes parsed from it. Fields are private:
//! the only way to change a task is to hand it a new line ([`Task::set_raw_text`]) or to
//! call a mutator (see [`crate::mutations`]), which rewrites the line and parses it
//! again. Attributes therefore can never drift from the text.
//!
//! ## Edge Cases
//!
//! - **Blank line**: `is_blank()` is true, every other attribute is absent, and
//!   mutators leave the line alone.
//! - **Bad date**: `due:2024-02-30` is text; the task has no due date.
//! - **Priority after the creation date**: `2024-01-01 (A) Foo` has no priority.
//! - **Completed with priority**: `x 2024-06-01 (A) Foo` keeps priority `A`.
//!
//! ## Key Functions
//!
//! - [`Task::new`]: parse a line
//! - [`Task::with_creation_date`]: parse a line, adding a creation date if it has none
//! - [`Task::serialize`]: lay the attributes out again

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::dates;
use crate::grammar::{self, Prefix};

/// How urgent a task is, relative to a given day.
///
/// The declaration order is the sort order: overdue tasks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DueState {
    Overdue,
    DueToday,
    NotDue,
}

impl DueState {
    pub fn name(&self) -> &'static str {
        match self {
            DueState::Overdue => "Overdue",
            DueState::DueToday => "DueToday",
            DueState::NotDue => "NotDue",
        }
    }
}

/// Where a given day falls relative to a task's threshold (`t:`) date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ThresholdState {
    BeforeThresholdDate,
    OnThresholdDate,
    AfterThresholdDate,
}

impl ThresholdState {
    pub fn name(&self) -> &'static str {
        match self {
            ThresholdState::BeforeThresholdDate => "BeforeThresholdDate",
            ThresholdState::OnThresholdDate => "OnThresholdDate",
            ThresholdState::AfterThresholdDate => "AfterThresholdDate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    task_id: usize,
    raw_text: String,
    text: String,
    priority: Option<char>,
    completed: bool,
    completion_date: Option<NaiveDate>,
    creation_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    threshold_date: Option<NaiveDate>,
    projects: Vec<String>,
    contexts: Vec<String>,
    blank: bool,
}

impl Task {
    /// Parses a raw line. `task_id` is the line's position in its list.
    pub fn new(raw_text: impl Into<String>, task_id: usize) -> Self {
        let raw_text = raw_text.into();
        if raw_text.trim().is_empty() {
            return Self::blank(raw_text, task_id);
        }

        let prefix = grammar::split_prefix(&raw_text);
        let inline = grammar::scan_inline(prefix.text);
        Self {
            task_id,
            text: prefix.text.to_string(),
            priority: prefix.priority,
            completed: prefix.completed,
            completion_date: prefix.completion_date,
            creation_date: prefix.creation_date,
            due_date: inline.due_date,
            threshold_date: inline.threshold_date,
            projects: inline.projects,
            contexts: inline.contexts,
            blank: false,
            raw_text,
        }
    }

    /// Parses a raw line and, unless it is blank or already has one, gives it
    /// `creation_date`.
    ///
    /// A completed line without a completion date is left alone: it has no
    /// layout that holds a creation date without also claiming a completion date.
    pub fn with_creation_date(
        raw_text: impl Into<String>,
        task_id: usize,
        creation_date: NaiveDate,
    ) -> Self {
        let mut task = Self::new(raw_text, task_id);
        let undated_completion = task.completed && task.completion_date.is_none();
        if !task.blank && task.creation_date.is_none() && !undated_completion {
            let mut prefix = task.prefix();
            prefix.creation_date = Some(creation_date);
            let line = grammar::compose(&prefix);
            task.set_raw_text(line);
        }
        task
    }

    fn blank(raw_text: String, task_id: usize) -> Self {
        Self {
            task_id,
            raw_text,
            text: String::new(),
            priority: None,
            completed: false,
            completion_date: None,
            creation_date: None,
            due_date: None,
            threshold_date: None,
            projects: Vec::new(),
            contexts: Vec::new(),
            blank: true,
        }
    }

    /// Replaces the line, re-deriving every attribute. The task id is kept.
    pub fn set_raw_text(&mut self, raw_text: impl Into<String>) {
        *self = Self::new(raw_text, self.task_id);
    }

    pub(crate) fn set_task_id(&mut self, task_id: usize) {
        self.task_id = task_id;
    }

    /// The attributes as a [`Prefix`], borrowing the free text.
    pub(crate) fn prefix(&self) -> Prefix<'_> {
        Prefix {
            completed: self.completed,
            completion_date: self.completion_date,
            priority: self.priority,
            creation_date: self.creation_date,
            text: &self.text,
        }
    }

    /// Lays the attributes out in the canonical order.
    ///
    /// Parsing the result yields the same attributes as this task. Blank lines are
    /// returned as they are.
    pub fn serialize(&self) -> String {
        if self.blank {
            return self.raw_text.clone();
        }
        grammar::compose(&self.prefix())
    }

    pub fn task_id(&self) -> usize {
        self.task_id
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// The free text after the completion marker, priority and creation date.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn priority(&self) -> Option<char> {
        self.priority
    }

    pub fn is_prioritized(&self) -> bool {
        self.priority.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_blank(&self) -> bool {
        self.blank
    }

    pub fn completion_date(&self) -> Option<NaiveDate> {
        self.completion_date
    }

    pub fn creation_date(&self) -> Option<NaiveDate> {
        self.creation_date
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn threshold_date(&self) -> Option<NaiveDate> {
        self.threshold_date
    }

    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    pub fn contexts(&self) -> &[String] {
        &self.contexts
    }

    pub fn has_projects(&self) -> bool {
        !self.projects.is_empty()
    }

    pub fn has_contexts(&self) -> bool {
        !self.contexts.is_empty()
    }

    /// Due state relative to `today`. Tasks without a due date are not due.
    pub fn due_state_on(&self, today: NaiveDate) -> DueState {
        match self.due_date {
            Some(due) if due < today => DueState::Overdue,
            Some(due) if due == today => DueState::DueToday,
            _ => DueState::NotDue,
        }
    }

    pub fn due_state(&self) -> DueState {
        self.due_state_on(dates::today())
    }

    /// Threshold state relative to `today`. Tasks without a threshold date are
    /// always past it.
    pub fn threshold_state_on(&self, today: NaiveDate) -> ThresholdState {
        match self.threshold_date {
            Some(threshold) if today < threshold => ThresholdState::BeforeThresholdDate,
            Some(threshold) if today == threshold => ThresholdState::OnThresholdDate,
            _ => ThresholdState::AfterThresholdDate,
        }
    }

    pub fn threshold_state(&self) -> ThresholdState {
        self.threshold_state_on(dates::today())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_text)
    }
}
