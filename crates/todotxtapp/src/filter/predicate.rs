//! The predicate expression tree and its evaluator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::attributes::{get_spec, AttrValue, AttributeKind};
use crate::dates::{self, add_days};
use crate::model::Task;

/// Comparison operation for [`Predicate::Compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    /// Exact equality match.
    Eq,
    /// Not equal.
    Ne,
}

/// How a task date relates to the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Before,
    On,
    After,
}

/// The reference side of a date test.
///
/// `Today` and `DaysFromToday` are resolved at evaluation time, so a saved preset
/// like "due within a week" keeps meaning the same thing tomorrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DateRef {
    Fixed(NaiveDate),
    Today,
    DaysFromToday(i64),
}

impl DateRef {
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DateRef::Fixed(date) => *date,
            DateRef::Today => today,
            DateRef::DaysFromToday(days) => add_days(today, *days),
        }
    }
}

/// Whether a [`Predicate::Member`] test needs one or every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberMode {
    /// At least one of the values is present (OR logic).
    Any,
    /// Every value is present (AND logic).
    All,
}

/// A boolean expression over task attributes.
///
/// Leaves name attributes from [`crate::attributes::ATTRIBUTES`]. A leaf naming an
/// unknown attribute, or comparing against a value of the wrong kind, is false.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum Predicate {
    /// Matches every task.
    #[default]
    All,
    /// True when every child is true; `And([])` is true.
    And(Vec<Predicate>),
    /// True when any child is true; `Or([])` is false.
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    Compare {
        attr: String,
        op: CompareOp,
        value: AttrValue,
    },
    /// Substring test over text attributes.
    Contains {
        attr: String,
        needle: String,
        ignore_case: bool,
    },
    /// Date test; tasks without the date never match.
    DateRelation {
        attr: String,
        relation: Relation,
        date: DateRef,
    },
    /// Set membership for `projects`, `contexts` and `priority`.
    Member {
        attr: String,
        values: Vec<String>,
        mode: MemberMode,
        ignore_case: bool,
    },
}

impl Predicate {
    pub fn eq(attr: impl Into<String>, value: AttrValue) -> Self {
        Predicate::Compare {
            attr: attr.into(),
            op: CompareOp::Eq,
            value,
        }
    }

    pub fn ne(attr: impl Into<String>, value: AttrValue) -> Self {
        Predicate::Compare {
            attr: attr.into(),
            op: CompareOp::Ne,
            value,
        }
    }

    /// Case-insensitive substring test.
    pub fn contains(attr: impl Into<String>, needle: impl Into<String>) -> Self {
        Predicate::Contains {
            attr: attr.into(),
            needle: needle.into(),
            ignore_case: true,
        }
    }

    pub fn date(attr: impl Into<String>, relation: Relation, date: DateRef) -> Self {
        Predicate::DateRelation {
            attr: attr.into(),
            relation,
            date,
        }
    }

    /// Case-insensitive "has any of these tags".
    pub fn any_of(attr: impl Into<String>, values: &[&str]) -> Self {
        Self::member(attr, values, MemberMode::Any)
    }

    /// Case-insensitive "has all of these tags".
    pub fn all_of(attr: impl Into<String>, values: &[&str]) -> Self {
        Self::member(attr, values, MemberMode::All)
    }

    fn member(attr: impl Into<String>, values: &[&str], mode: MemberMode) -> Self {
        Predicate::Member {
            attr: attr.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
            mode,
            ignore_case: true,
        }
    }

    pub fn not(inner: Predicate) -> Self {
        Predicate::Not(Box::new(inner))
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Predicate::All)
    }

    /// Evaluates against `task`, resolving date-relative parts against `today`.
    pub fn matches_on(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            Predicate::All => true,
            Predicate::And(children) => children.iter().all(|p| p.matches_on(task, today)),
            Predicate::Or(children) => children.iter().any(|p| p.matches_on(task, today)),
            Predicate::Not(inner) => !inner.matches_on(task, today),
            Predicate::Compare { attr, op, value } => {
                let Some(actual) = read(task, attr, today) else {
                    return false;
                };
                if !fits_kind(attr, value) {
                    return false;
                }
                match op {
                    CompareOp::Eq => actual == *value,
                    CompareOp::Ne => actual != *value,
                }
            }
            Predicate::Contains {
                attr,
                needle,
                ignore_case,
            } => {
                let Some(actual) = read(task, attr, today) else {
                    return false;
                };
                let Some(haystack) = actual.as_text() else {
                    return false;
                };
                if *ignore_case {
                    haystack.to_lowercase().contains(&needle.to_lowercase())
                } else {
                    haystack.contains(needle.as_str())
                }
            }
            Predicate::DateRelation {
                attr,
                relation,
                date,
            } => {
                let Some(actual) = read(task, attr, today).and_then(|v| v.as_date()) else {
                    return false;
                };
                let reference = date.resolve(today);
                match relation {
                    Relation::Before => actual < reference,
                    Relation::On => actual == reference,
                    Relation::After => actual > reference,
                }
            }
            Predicate::Member {
                attr,
                values,
                mode,
                ignore_case,
            } => {
                let Some(members) = read(task, attr, today).and_then(|v| v.as_members()) else {
                    return false;
                };
                let has = |wanted: &String| {
                    members
                        .iter()
                        .any(|m| names_match(m, wanted, *ignore_case))
                };
                match mode {
                    MemberMode::Any => values.iter().any(has),
                    MemberMode::All => values.iter().all(has),
                }
            }
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.matches_on(task, dates::today())
    }
}

/// Evaluates `predicate` against `task` relative to `today`.
pub fn evaluate_on(predicate: &Predicate, task: &Task, today: NaiveDate) -> bool {
    predicate.matches_on(task, today)
}

pub fn evaluate(predicate: &Predicate, task: &Task) -> bool {
    predicate.matches(task)
}

/// Reads a filterable attribute; anything else is treated as unknown.
fn read(task: &Task, attr: &str, today: NaiveDate) -> Option<AttrValue> {
    let spec = get_spec(attr)?;
    if !spec.filterable {
        return None;
    }
    task.get_attr_on(attr, today)
}

/// Whether `value` is a legal literal for the attribute `attr`.
fn fits_kind(attr: &str, value: &AttrValue) -> bool {
    let Some(spec) = get_spec(attr) else {
        return false;
    };
    matches!(
        (spec.kind, value),
        (AttributeKind::Bool, AttrValue::Bool(_))
            | (AttributeKind::Text, AttrValue::Text(_))
            | (AttributeKind::Letter, AttrValue::Letter(_) | AttrValue::Absent)
            | (AttributeKind::Date, AttrValue::Date(_) | AttrValue::Absent)
            | (AttributeKind::Enum, AttrValue::Enum(_))
            | (AttributeKind::List, AttrValue::List(_))
    )
}

fn names_match(have: &str, wanted: &str, ignore_case: bool) -> bool {
    if ignore_case {
        have.to_lowercase() == wanted.to_lowercase()
    } else {
        have == wanted
    }
}
