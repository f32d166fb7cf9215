//! Task mutators.
//!
//! Every mutator follows the same recipe: take the current attributes, change the
//! leading block (completion marker, priority, creation date) or a single `due:`
//! token, lay the line out again and re-parse it. Tags and other free text are never
//! reordered.
//!
//! Mutators leave blank lines alone. Only [`Task::set_priority`] can fail, when it is
//! handed something other than an uppercase ASCII letter.
//!
//! Completion and postponing depend on "today"; both come in a plain flavor reading
//! the local calendar and an `*_on` flavor taking the date.

use chrono::NaiveDate;
use tracing::trace;

use crate::dates::{self, add_days, format_date};
use crate::error::{Result, TodoError};
use crate::grammar::{self, DUE_KEY};
use crate::model::Task;

impl Task {
    fn rewrite(&mut self, line: String) {
        trace!(task_id = self.task_id(), from = self.raw_text(), to = %line, "rewrite task");
        self.set_raw_text(line);
    }

    // --- Priority ---

    /// Sets the priority, replacing any existing one.
    pub fn set_priority(&mut self, priority: char) -> Result<()> {
        if !priority.is_ascii_uppercase() {
            return Err(TodoError::InvalidArgument(format!(
                "priority must be a letter A-Z, got '{}'",
                priority
            )));
        }
        if self.is_blank() {
            return Ok(());
        }

        let mut prefix = self.prefix();
        prefix.priority = Some(priority);
        let line = grammar::compose(&prefix);
        self.rewrite(line);
        Ok(())
    }

    /// Raises the priority one step toward `A`. No priority becomes `A`; `A` stays `A`.
    pub fn increase_priority(&mut self) {
        let next = match self.priority() {
            None | Some('A') => 'A',
            Some(letter) => shift_letter(letter, -1),
        };
        self.apply_priority(next);
    }

    /// Lowers the priority one step toward `Z`. `Z` stays `Z`.
    ///
    /// A task without a priority gets `A`, the same as [`Task::increase_priority`].
    pub fn decrease_priority(&mut self) {
        let next = match self.priority() {
            None => 'A',
            Some('Z') => 'Z',
            Some(letter) => shift_letter(letter, 1),
        };
        self.apply_priority(next);
    }

    fn apply_priority(&mut self, letter: char) {
        // Both callers only produce letters in A..=Z.
        let _ = self.set_priority(letter);
    }

    pub fn remove_priority(&mut self) {
        if self.is_blank() || self.priority().is_none() {
            return;
        }
        let mut prefix = self.prefix();
        prefix.priority = None;
        let line = grammar::compose(&prefix);
        self.rewrite(line);
    }

    // --- Completion ---

    /// Marks the task complete as of `today`. No-op if it already is.
    pub fn mark_complete_on(&mut self, today: NaiveDate) {
        if self.is_blank() || self.is_completed() {
            return;
        }
        let line = format!("x {} {}", format_date(today), self.raw_text());
        self.rewrite(line);
    }

    pub fn mark_complete(&mut self) {
        self.mark_complete_on(dates::today());
    }

    /// Strips the completion marker and its date. No-op if not completed.
    pub fn mark_incomplete(&mut self) {
        if self.is_blank() || !self.is_completed() {
            return;
        }
        let mut prefix = self.prefix();
        prefix.completed = false;
        prefix.completion_date = None;
        let line = grammar::compose(&prefix);
        self.rewrite(line);
    }

    pub fn toggle_completion_on(&mut self, today: NaiveDate) {
        if self.is_completed() {
            self.mark_incomplete();
        } else {
            self.mark_complete_on(today);
        }
    }

    pub fn toggle_completion(&mut self) {
        self.toggle_completion_on(dates::today());
    }

    // --- Due dates ---

    /// Moves the due date by `days` (negative moves it earlier). A task without a due
    /// date becomes due `days` after `today`.
    pub fn postpone_on(&mut self, days: i64, today: NaiveDate) {
        let base = self.due_date().unwrap_or(today);
        self.set_due_date(add_days(base, days));
    }

    pub fn postpone(&mut self, days: i64) {
        self.postpone_on(days, dates::today());
    }

    /// Sets the due date, rewriting the first `due:` token in place or appending one.
    pub fn set_due_date(&mut self, due: NaiveDate) {
        if self.is_blank() {
            return;
        }
        let token = format!("{}{}", DUE_KEY, format_date(due));
        let text = self.text();

        let existing = grammar::tokens(text)
            .find(|t| grammar::keyed_date(t.text, DUE_KEY).is_some());
        let new_text = match existing {
            Some(found) => grammar::replace_span(text, found.start, found.end, &token),
            None => {
                let trimmed = text.trim_end();
                if trimmed.is_empty() {
                    token
                } else {
                    format!("{} {}", trimmed, token)
                }
            }
        };

        let mut prefix = self.prefix();
        prefix.text = &new_text;
        let line = grammar::compose(&prefix);
        self.rewrite(line);
    }

    /// Removes every `due:<date>` token. No-op without a due date.
    pub fn remove_due_date(&mut self) {
        if self.due_date().is_none() {
            return;
        }
        let mut text = self.text().to_string();
        while let Some(found) =
            grammar::tokens(&text).find(|t| grammar::keyed_date(t.text, DUE_KEY).is_some())
        {
            text = grammar::remove_span(&text, found.start, found.end);
        }

        let mut prefix = self.prefix();
        prefix.text = &text;
        let line = grammar::compose(&prefix);
        self.rewrite(line);
    }

    // --- Free text ---

    /// Appends text to the end of the line.
    pub fn append_text(&mut self, addition: &str) {
        let addition = addition.trim();
        if addition.is_empty() || self.is_blank() {
            return;
        }
        let line = format!("{} {}", self.raw_text().trim_end(), addition);
        self.rewrite(line);
    }
}

fn shift_letter(letter: char, offset: i8) -> char {
    let shifted = (letter as u8 as i16 + offset as i16).clamp(b'A' as i16, b'Z' as i16);
    shifted as u8 as char
}
