//! Low-level scanning of todo.txt lines.
//!
//! A line is a short prefix of positional elements followed by free text:
//!
//! ```text
//! [x <completionDate> ][(<priority>) ][<creationDate> ]<free text>
//! ```
//!
//! Prefix elements are separated by exactly one space and only count when the whole
//! element matches (`(a)` is not a priority, `2024-1-1` is not a date). The first
//! element that does not match ends the prefix, and everything from there on is free
//! text, untouched.
//!
//! Free text is scanned token by token (whitespace separated) for `due:<date>`,
//! `t:<date>`, `+project` and `@context`. Tokens are reported with byte spans so that
//! mutators can rewrite a single token in place.

use chrono::NaiveDate;

use crate::dates::{format_date, parse_date};

pub const DUE_KEY: &str = "due:";
pub const THRESHOLD_KEY: &str = "t:";
pub const PROJECT_SIGIL: char = '+';
pub const CONTEXT_SIGIL: char = '@';

/// The positional prefix of a line, and the free text after it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Prefix<'a> {
    pub completed: bool,
    pub completion_date: Option<NaiveDate>,
    pub priority: Option<char>,
    pub creation_date: Option<NaiveDate>,
    pub text: &'a str,
}

/// Values extracted from the free text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inline {
    pub due_date: Option<NaiveDate>,
    pub threshold_date: Option<NaiveDate>,
    pub projects: Vec<String>,
    pub contexts: Vec<String>,
}

/// A whitespace-delimited token of free text with its byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

/// Splits the next element off `rest`: up to the first space, consuming that space.
fn next_element(rest: &str) -> (&str, &str) {
    match rest.find(' ') {
        Some(i) => (&rest[..i], &rest[i + 1..]),
        None => (rest, ""),
    }
}

/// Parses a `(X)` priority element.
pub fn parse_priority(element: &str) -> Option<char> {
    let mut chars = element.chars();
    match (chars.next(), chars.next(), chars.next(), chars.next()) {
        (Some('('), Some(letter), Some(')'), None) if letter.is_ascii_uppercase() => Some(letter),
        _ => None,
    }
}

/// Splits a line into its positional prefix and free text.
///
/// Never fails: in the worst case the whole line is free text.
pub fn split_prefix(line: &str) -> Prefix<'_> {
    let mut prefix = Prefix {
        text: line,
        ..Default::default()
    };

    let (element, rest) = next_element(prefix.text);
    if element == "x" {
        prefix.completed = true;
        prefix.text = rest;

        let (element, rest) = next_element(prefix.text);
        if let Some(date) = parse_date(element) {
            prefix.completion_date = Some(date);
            prefix.text = rest;
        }
    }

    let (element, rest) = next_element(prefix.text);
    if let Some(priority) = parse_priority(element) {
        prefix.priority = Some(priority);
        prefix.text = rest;
    }

    let (element, rest) = next_element(prefix.text);
    if let Some(date) = parse_date(element) {
        prefix.creation_date = Some(date);
        prefix.text = rest;
    }

    prefix
}

/// Lays out a prefix and its free text as a line.
///
/// Elements are joined by single spaces; an empty free text adds nothing, so a
/// line never ends with a separator it did not need.
///
/// `x <date>` always reads back as a completion date. A completed prefix with a
/// creation date but no completion date or priority therefore writes the creation
/// date in both places, so the creation date survives the round trip.
pub fn compose(prefix: &Prefix<'_>) -> String {
    let mut elements: Vec<String> = Vec::with_capacity(4);
    if prefix.completed {
        elements.push("x".to_string());
        let completion_date = match prefix.completion_date {
            None if prefix.priority.is_none() => prefix.creation_date,
            date => date,
        };
        if let Some(date) = completion_date {
            elements.push(format_date(date));
        }
    }
    if let Some(priority) = prefix.priority {
        elements.push(format!("({})", priority));
    }
    if let Some(date) = prefix.creation_date {
        elements.push(format_date(date));
    }

    let mut line = elements.join(" ");
    if !prefix.text.is_empty() {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(prefix.text);
    }
    line
}

/// Iterator over the whitespace-delimited tokens of a string.
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.text[self.pos..];
        let start = self.pos + rest.find(|c: char| !c.is_whitespace())?;
        let len = self.text[start..]
            .find(char::is_whitespace)
            .unwrap_or(self.text.len() - start);
        let end = start + len;
        self.pos = end;
        Some(Token {
            start,
            end,
            text: &self.text[start..end],
        })
    }
}

pub fn tokens(text: &str) -> Tokens<'_> {
    Tokens { text, pos: 0 }
}

/// Parses a `key:<date>` token, e.g. `due:2024-01-10`.
pub fn keyed_date(token: &str, key: &str) -> Option<NaiveDate> {
    token.strip_prefix(key).and_then(parse_date)
}

/// Returns the tag name of a `+project` or `@context` token.
pub fn tag_name(token: &str, sigil: char) -> Option<&str> {
    token.strip_prefix(sigil).filter(|name| !name.is_empty())
}

/// Extracts due/threshold dates and tags from free text.
///
/// The first valid `due:`/`t:` token wins; tags keep first-occurrence order and are
/// not repeated.
pub fn scan_inline(text: &str) -> Inline {
    let mut inline = Inline::default();

    for token in tokens(text) {
        if let Some(name) = tag_name(token.text, PROJECT_SIGIL) {
            push_unique(&mut inline.projects, name);
        } else if let Some(name) = tag_name(token.text, CONTEXT_SIGIL) {
            push_unique(&mut inline.contexts, name);
        } else if let Some(date) = keyed_date(token.text, DUE_KEY) {
            inline.due_date.get_or_insert(date);
        } else if let Some(date) = keyed_date(token.text, THRESHOLD_KEY) {
            inline.threshold_date.get_or_insert(date);
        }
    }

    inline
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|existing| existing == name) {
        list.push(name.to_string());
    }
}

/// Removes the byte span `[start, end)` from `text` together with one adjacent
/// whitespace character, preferring the one before the span.
pub fn remove_span(text: &str, start: usize, end: usize) -> String {
    let before = &text[..start];
    let after = &text[end..];

    if let Some(ws) = before.chars().next_back().filter(|c| c.is_whitespace()) {
        format!("{}{}", &before[..before.len() - ws.len_utf8()], after)
    } else if let Some(ws) = after.chars().next().filter(|c| c.is_whitespace()) {
        format!("{}{}", before, &after[ws.len_utf8()..])
    } else {
        format!("{}{}", before, after)
    }
}

/// Replaces the byte span `[start, end)` of `text` with `replacement`.
pub fn replace_span(text: &str, start: usize, end: usize, replacement: &str) -> String {
    format!("{}{}{}", &text[..start], replacement, &text[end..])
}
