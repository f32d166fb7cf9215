//! Attribute value types.
//!
//! This module defines the runtime representation of task attribute values. Filter
//! predicates carry these values when they are saved, so the type is serializable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Runtime representation of an attribute value.
///
/// This enum captures every value type a task attribute can hold. It's used both
/// for reading attributes and as the literal side of filter comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttrValue {
    /// Simple boolean value (e.g., `completed`)
    Bool(bool),

    /// Free text (e.g., `raw_text`)
    Text(String),

    /// Single letter (e.g., `priority`)
    Letter(char),

    /// Calendar date (e.g., `due_date`)
    Date(NaiveDate),

    /// Derived state as a string (e.g., `due_state` = "Overdue" | "DueToday" | "NotDue")
    Enum(String),

    /// Ordered list of strings (e.g., `projects`)
    List(Vec<String>),

    /// The attribute exists but the task has no value for it (no priority, no due date)
    Absent,
}

impl AttrValue {
    /// Wraps an optional letter, mapping `None` to [`AttrValue::Absent`].
    pub fn letter(value: Option<char>) -> Self {
        value.map_or(AttrValue::Absent, AttrValue::Letter)
    }

    /// Wraps an optional date, mapping `None` to [`AttrValue::Absent`].
    pub fn date(value: Option<NaiveDate>) -> Self {
        value.map_or(AttrValue::Absent, AttrValue::Date)
    }

    /// Get the string if this is Text or Enum.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) | AttrValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            AttrValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// View this value as a set of strings, for membership tests.
    ///
    /// Lists are themselves; a letter is a one-element set; absent is empty.
    pub fn as_members(&self) -> Option<Vec<String>> {
        match self {
            AttrValue::List(v) => Some(v.clone()),
            AttrValue::Letter(c) => Some(vec![c.to_string()]),
            AttrValue::Absent => Some(Vec::new()),
            _ => None,
        }
    }
}
