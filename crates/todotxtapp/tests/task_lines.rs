use chrono::NaiveDate;
use todotxtapp::{DueState, Task};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

const CORPUS: &[&str] = &[
    "Plain task",
    "(A) Call mom",
    "2024-01-01 Dated task",
    "(B) 2024-01-01 Dated with priority +project @context",
    "x Done without date",
    "x 2024-06-01 Done with date",
    "x 2024-06-01 (C) 2024-01-01 Everything +a +b @c due:2024-06-10 t:2024-06-05",
    "Tags +first +second +first @ctx",
    "Bad dates due:2024-02-30 t:2024-13-01",
    "(a) lowercase priority is text",
    "2024-01-01 (A) priority after date is text",
    "Email john@example.com about 1+1",
    "x",
    "(Z)",
    "x (B) 2024-01-01 Undated completion",
];

#[test]
fn end_to_end_parse_and_complete() {
    let mut task = Task::new("(A) 2024-01-01 Pay +bills @home due:2024-01-10", 0);
    assert_eq!(task.priority(), Some('A'));
    assert_eq!(task.creation_date(), Some(d(2024, 1, 1)));
    assert_eq!(task.due_date(), Some(d(2024, 1, 10)));
    assert_eq!(task.projects(), ["bills"]);
    assert_eq!(task.contexts(), ["home"]);

    task.mark_complete_on(d(2024, 6, 1));
    assert_eq!(
        task.raw_text(),
        "x 2024-06-01 (A) 2024-01-01 Pay +bills @home due:2024-01-10"
    );
    assert!(task.is_completed());
    assert_eq!(task.completion_date(), Some(d(2024, 6, 1)));
    assert_eq!(task.priority(), Some('A'));
}

#[test]
fn parse_serialize_parse_keeps_attributes() {
    for line in CORPUS {
        let first = Task::new(*line, 0);
        let second = Task::new(first.serialize(), 0);
        assert_eq!(first.priority(), second.priority(), "{line}");
        assert_eq!(first.is_completed(), second.is_completed(), "{line}");
        assert_eq!(first.completion_date(), second.completion_date(), "{line}");
        assert_eq!(first.creation_date(), second.creation_date(), "{line}");
        assert_eq!(first.due_date(), second.due_date(), "{line}");
        assert_eq!(first.threshold_date(), second.threshold_date(), "{line}");
        assert_eq!(first.projects(), second.projects(), "{line}");
        assert_eq!(first.contexts(), second.contexts(), "{line}");
        assert_eq!(first.text(), second.text(), "{line}");
    }
}

#[test]
fn lenient_parsing_keeps_odd_input_as_text() {
    let task = Task::new("Bad dates due:2024-02-30 t:2024-13-01", 0);
    assert_eq!(task.due_date(), None);
    assert_eq!(task.threshold_date(), None);

    let task = Task::new("(a) lowercase priority is text", 0);
    assert_eq!(task.priority(), None);

    let task = Task::new("Email john@example.com about 1+1", 0);
    assert!(task.contexts().is_empty());
    assert!(task.projects().is_empty());
}

#[test]
fn completion_is_idempotent() {
    let mut task = Task::new("(B) Water plants", 0);
    task.mark_complete_on(d(2024, 6, 1));
    let once = task.raw_text().to_string();
    task.mark_complete_on(d(2024, 6, 2));
    assert_eq!(task.raw_text(), once);

    task.toggle_completion_on(d(2024, 6, 2));
    assert_eq!(task.raw_text(), "(B) Water plants");
}

#[test]
fn removing_a_missing_due_date_changes_nothing() {
    let mut task = Task::new("No due +here", 0);
    task.remove_due_date();
    assert_eq!(task.raw_text(), "No due +here");
}

#[test]
fn priority_clamps_at_both_ends() {
    let mut task = Task::new("Plain", 0);
    task.increase_priority();
    assert_eq!(task.priority(), Some('A'));
    task.increase_priority();
    assert_eq!(task.priority(), Some('A'));

    let mut task = Task::new("(Z) Last", 0);
    task.decrease_priority();
    assert_eq!(task.priority(), Some('Z'));

    let mut task = Task::new("Plain", 0);
    task.decrease_priority();
    assert_eq!(task.priority(), Some('A'));
}

#[test]
fn postpone_moves_due_date() {
    let today = d(2024, 6, 1);
    let mut task = Task::new("Pay due:2024-01-31", 0);
    task.postpone_on(1, today);
    assert_eq!(task.due_date(), Some(d(2024, 2, 1)));
    assert_eq!(task.due_state_on(today), DueState::Overdue);

    let mut task = Task::new("Pay", 0);
    task.postpone_on(3, today);
    assert_eq!(task.raw_text(), "Pay due:2024-06-04");
}

#[derive(Debug, Clone, PartialEq)]
struct Attrs {
    priority: Option<char>,
    completed: bool,
    completion_date: Option<NaiveDate>,
    creation_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    threshold_date: Option<NaiveDate>,
    projects: Vec<String>,
    contexts: Vec<String>,
    text: String,
}

impl Attrs {
    fn of(task: &Task) -> Self {
        Self {
            priority: task.priority(),
            completed: task.is_completed(),
            completion_date: task.completion_date(),
            creation_date: task.creation_date(),
            due_date: task.due_date(),
            threshold_date: task.threshold_date(),
            projects: task.projects().to_vec(),
            contexts: task.contexts().to_vec(),
            text: task.text().to_string(),
        }
    }
}

/// Applies `mutate` to every corpus line and checks that whatever `touched` does not
/// reset stays as it was parsed.
fn assert_mutator_keeps_the_rest(
    name: &str,
    mutate: impl Fn(&mut Task),
    touched: impl Fn(&mut Attrs, &Attrs),
) {
    for line in CORPUS {
        let mut task = Task::new(*line, 0);
        let before = Attrs::of(&task);
        mutate(&mut task);
        let mut after = Attrs::of(&task);
        touched(&mut after, &before);
        assert_eq!(after, before, "{name} on {line:?} gave {:?}", task.raw_text());
    }
}

#[test]
fn priority_mutators_leave_other_attributes_alone() {
    let priority = |after: &mut Attrs, before: &Attrs| after.priority = before.priority;
    assert_mutator_keeps_the_rest("set_priority", |t| t.set_priority('B').unwrap(), priority);
    assert_mutator_keeps_the_rest("increase_priority", Task::increase_priority, priority);
    assert_mutator_keeps_the_rest("decrease_priority", Task::decrease_priority, priority);
}

#[test]
fn remove_priority_leaves_other_attributes_alone() {
    assert_mutator_keeps_the_rest("remove_priority", Task::remove_priority, |after, before| {
        after.priority = before.priority;
        // An undated completion takes the creation date as its completion date.
        if before.completed && before.completion_date.is_none() {
            assert_eq!(after.completion_date, before.creation_date);
            after.completion_date = None;
        }
    });
}

#[test]
fn completion_mutators_leave_other_attributes_alone() {
    let completion = |after: &mut Attrs, before: &Attrs| {
        after.completed = before.completed;
        after.completion_date = before.completion_date;
    };
    assert_mutator_keeps_the_rest(
        "mark_complete_on",
        |t| t.mark_complete_on(d(2024, 6, 2)),
        completion,
    );
    assert_mutator_keeps_the_rest("mark_incomplete", Task::mark_incomplete, completion);
}

#[test]
fn due_date_mutators_leave_other_attributes_alone() {
    let due = |after: &mut Attrs, before: &Attrs| {
        after.due_date = before.due_date;
        after.text = before.text.clone();
    };
    assert_mutator_keeps_the_rest("set_due_date", |t| t.set_due_date(d(2024, 7, 1)), due);
    assert_mutator_keeps_the_rest("remove_due_date", Task::remove_due_date, due);
    assert_mutator_keeps_the_rest("postpone_on", |t| t.postpone_on(3, d(2024, 6, 1)), due);
}

#[test]
fn append_text_leaves_other_attributes_alone() {
    assert_mutator_keeps_the_rest(
        "append_text",
        |t| t.append_text("extra words"),
        |after, before| after.text = before.text.clone(),
    );
}
