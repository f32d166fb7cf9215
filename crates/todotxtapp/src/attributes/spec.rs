//! Attribute specifications and registry.
//!
//! This module defines the schema for task attributes: what kind of value each one
//! holds and whether it can be filtered on.

/// The kind of value an attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Simple boolean (e.g., `completed`)
    Bool,

    /// Free text (e.g., `raw_text`)
    Text,

    /// Single uppercase letter (`priority`)
    Letter,

    /// Optional calendar date (e.g., `due_date`)
    Date,

    /// Closed set of derived values (e.g., `due_state`)
    Enum,

    /// Ordered set of tag names (e.g., `projects`)
    List,
}

/// Specification for a single task attribute.
#[derive(Debug, Clone)]
pub struct AttributeSpec {
    /// The attribute name used in predicates (e.g., "priority", "due_date")
    pub name: &'static str,

    /// The kind of value this attribute holds
    pub kind: AttributeKind,

    /// Whether this attribute can be used in filter predicates
    pub filterable: bool,
}

impl AttributeSpec {
    const fn new(name: &'static str, kind: AttributeKind) -> Self {
        Self {
            name,
            kind,
            filterable: false,
        }
    }

    const fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }
}

/// Registry of all task attributes.
///
/// Adding a new attribute means adding an entry here and a case in
/// [`crate::model::Task::get_attr_on`].
pub const ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::new("task_id", AttributeKind::Text),
    AttributeSpec::new("raw_text", AttributeKind::Text).filterable(),
    AttributeSpec::new("text", AttributeKind::Text).filterable(),
    AttributeSpec::new("priority", AttributeKind::Letter).filterable(),
    AttributeSpec::new("completed", AttributeKind::Bool).filterable(),
    AttributeSpec::new("blank", AttributeKind::Bool).filterable(),
    AttributeSpec::new("completion_date", AttributeKind::Date).filterable(),
    AttributeSpec::new("creation_date", AttributeKind::Date).filterable(),
    AttributeSpec::new("due_date", AttributeKind::Date).filterable(),
    AttributeSpec::new("threshold_date", AttributeKind::Date).filterable(),
    AttributeSpec::new("due_state", AttributeKind::Enum).filterable(),
    AttributeSpec::new("threshold_state", AttributeKind::Enum).filterable(),
    AttributeSpec::new("projects", AttributeKind::List).filterable(),
    AttributeSpec::new("contexts", AttributeKind::List).filterable(),
];

/// Look up an attribute spec by name.
pub fn get_spec(name: &str) -> Option<&'static AttributeSpec> {
    ATTRIBUTES.iter().find(|spec| spec.name == name)
}
