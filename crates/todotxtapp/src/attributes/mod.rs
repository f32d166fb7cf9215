//! # Attribute System
//!
//! Filter predicates and the client talk about task fields by name ("priority",
//! "due_date", "projects"). This module gives those names a type:
//!
//! - **Values**: [`AttrValue`], the runtime representation of any attribute
//! - **Specifications**: [`ATTRIBUTES`], the registry of known names and kinds
//! - **Unified access**: [`Task::get_attr_on`] reads any attribute by name
//!
//! ## Attribute Types
//!
//! | Kind | Examples | Description |
//! |------|----------|-------------|
//! | `Bool` | `completed`, `blank` | Simple true/false |
//! | `Text` | `raw_text`, `text` | Free text |
//! | `Letter` | `priority` | `A`–`Z` or absent |
//! | `Date` | `due_date`, `threshold_date` | Calendar day or absent |
//! | `Enum` | `due_state` | Derived from today's date |
//! | `List` | `projects`, `contexts` | Tag names without sigil |
//!
//! ## Usage
//!
//! ```
//! use todotxtapp::attributes::AttrValue;
//! use todotxtapp::Task;
//!
//! let task = Task::new("(B) Call mom @phone", 0);
//! assert_eq!(task.get_attr("priority"), Some(AttrValue::Letter('B')));
//! assert_eq!(task.get_attr("nonexistent"), None);
//! ```

mod spec;
mod value;

pub use spec::{get_spec, AttributeKind, AttributeSpec, ATTRIBUTES};
pub use value::AttrValue;

use chrono::NaiveDate;

use crate::dates;
use crate::model::Task;

impl Task {
    /// Get an attribute value by name, with date-relative attributes computed
    /// against `today`.
    ///
    /// Returns `None` if the attribute name is not recognized. An attribute the
    /// task simply lacks (no priority, no due date) is [`AttrValue::Absent`].
    pub fn get_attr_on(&self, name: &str, today: NaiveDate) -> Option<AttrValue> {
        let value = match name {
            "task_id" => AttrValue::Text(self.task_id().to_string()),
            "raw_text" => AttrValue::Text(self.raw_text().to_string()),
            "text" => AttrValue::Text(self.text().to_string()),
            "priority" => AttrValue::letter(self.priority()),
            "completed" => AttrValue::Bool(self.is_completed()),
            "blank" => AttrValue::Bool(self.is_blank()),
            "completion_date" => AttrValue::date(self.completion_date()),
            "creation_date" => AttrValue::date(self.creation_date()),
            "due_date" => AttrValue::date(self.due_date()),
            "threshold_date" => AttrValue::date(self.threshold_date()),
            "due_state" => AttrValue::Enum(self.due_state_on(today).name().to_string()),
            "threshold_state" => {
                AttrValue::Enum(self.threshold_state_on(today).name().to_string())
            }
            "projects" => AttrValue::List(self.projects().to_vec()),
            "contexts" => AttrValue::List(self.contexts().to_vec()),
            _ => return None,
        };
        Some(value)
    }

    /// Get an attribute value by name, relative to the local calendar day.
    pub fn get_attr(&self, name: &str) -> Option<AttrValue> {
        self.get_attr_on(name, dates::today())
    }
}
