//! Live search: a free-text query turned into a predicate.

use super::Predicate;
use crate::grammar::{CONTEXT_SIGIL, PROJECT_SIGIL};

/// Builds the predicate for a search box query.
///
/// Every whitespace-separated term must match. A term matches a task when it is a
/// case-insensitive substring of the raw line, or when it names one of the task's
/// projects or contexts (a leading `+` or `@` is ignored, so `@bills` finds
/// `+bills`). An empty query matches everything.
pub fn search_predicate(query: &str) -> Predicate {
    let terms: Vec<Predicate> = query.split_whitespace().map(term_predicate).collect();
    if terms.is_empty() {
        return Predicate::All;
    }
    Predicate::And(terms)
}

fn term_predicate(term: &str) -> Predicate {
    let name = term
        .strip_prefix(PROJECT_SIGIL)
        .or_else(|| term.strip_prefix(CONTEXT_SIGIL))
        .unwrap_or(term);
    Predicate::Or(vec![
        Predicate::contains("raw_text", term),
        Predicate::any_of("projects", &[name]),
        Predicate::any_of("contexts", &[name]),
    ])
}
