//! Text output for the terminal.
//!
//! Renderers return strings; the caller prints them. Styling goes through [`Styles`],
//! which is a set of no-op styles when stdout is not a color terminal.

use chrono::NaiveDate;
use console::{Style, Term};
use todotxtapp::filter::Predicate;
use todotxtapp::grammar::{CONTEXT_SIGIL, PROJECT_SIGIL};
use todotxtapp::metadata::{TagCount, TasklistMetadata};
use todotxtapp::{DueState, Task};

pub struct Styles {
    pub number: Style,
    pub completed: Style,
    pub overdue: Style,
    pub due_today: Style,
    pub top_priority: Style,
    pub heading: Style,
    pub muted: Style,
}

impl Styles {
    pub fn for_stdout() -> Self {
        if Term::stdout().features().colors_supported() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            number: Style::new().dim(),
            completed: Style::new().dim(),
            overdue: Style::new().red(),
            due_today: Style::new().yellow(),
            top_priority: Style::new().bold(),
            heading: Style::new().bold(),
            muted: Style::new().dim(),
        }
    }

    pub fn plain() -> Self {
        Self {
            number: Style::new(),
            completed: Style::new(),
            overdue: Style::new(),
            due_today: Style::new(),
            top_priority: Style::new(),
            heading: Style::new(),
            muted: Style::new(),
        }
    }

    fn for_task(&self, task: &Task, today: NaiveDate) -> Option<&Style> {
        if task.is_completed() {
            return Some(&self.completed);
        }
        match task.due_state_on(today) {
            DueState::Overdue => Some(&self.overdue),
            DueState::DueToday => Some(&self.due_today),
            DueState::NotDue if task.priority() == Some('A') => Some(&self.top_priority),
            DueState::NotDue => None,
        }
    }
}

/// Numbered task lines, 1-based, followed by a count footer. Blank lines are skipped.
pub fn render_task_list(
    shown: &[Task],
    total: usize,
    styles: &Styles,
    today: NaiveDate,
) -> String {
    let visible: Vec<&Task> = shown.iter().filter(|task| !task.is_blank()).collect();
    let width = total.max(1).to_string().len();

    let mut out = String::new();
    for task in &visible {
        let number = format!("{:>width$}", task.task_id() + 1);
        let line = match styles.for_task(task, today) {
            Some(style) => style.apply_to(task.raw_text()).to_string(),
            None => task.raw_text().to_string(),
        };
        out.push_str(&format!("{} {}\n", styles.number.apply_to(number), line));
    }
    out.push_str(&format!(
        "{}\n",
        styles
            .muted
            .apply_to(format!("--\n{} of {} tasks shown", visible.len(), total))
    ));
    out
}

pub fn render_stats(meta: &TasklistMetadata, styles: &Styles) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {} ({} done, {} open)\n",
        styles.heading.apply_to("Tasks:"),
        meta.total_task_count,
        meta.completed_task_count,
        meta.incomplete_task_count
    ));
    out.push_str(&format!(
        "{} {} overdue, {} due today, {} not due\n",
        styles.heading.apply_to("Due:"),
        meta.overdue_task_count,
        meta.due_today_task_count,
        meta.not_due_task_count
    ));
    out.push_str(&tag_line("Projects:", &PROJECT_SIGIL.to_string(), &meta.projects, styles));
    out.push_str(&tag_line("Contexts:", &CONTEXT_SIGIL.to_string(), &meta.contexts, styles));
    out.push_str(&tag_line("Priorities:", "", &meta.priorities, styles));
    out
}

fn tag_line(label: &str, sigil: &str, tags: &[TagCount], styles: &Styles) -> String {
    let body = if tags.is_empty() {
        styles.muted.apply_to("none").to_string()
    } else {
        tags.iter()
            .map(|tag| format!("{}{} ({})", sigil, tag.name, tag.count))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("{} {}\n", styles.heading.apply_to(label), body)
}

/// One line per preset: `n: <predicate json>`, with `*` marking the active number.
pub fn render_presets(presets: &[(u8, Predicate)], active: u8) -> String {
    presets
        .iter()
        .map(|(number, predicate)| {
            let marker = if *number == active { '*' } else { ' ' };
            let body = serde_json::to_string(predicate).unwrap_or_else(|e| format!("<{e}>"));
            format!("{marker}{number}: {body}\n")
        })
        .collect()
}
