#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A throwaway todo file, preferences file and (absent) config file.
struct Sandbox {
    _temp: TempDir,
    todo: PathBuf,
    prefs: PathBuf,
    config: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        Self {
            todo: temp.path().join("todo.txt"),
            prefs: temp.path().join("prefs.json"),
            config: temp.path().join("todotxt.toml"),
            _temp: temp,
        }
    }

    fn with_tasks(text: &str) -> Self {
        let sandbox = Self::new();
        fs::write(&sandbox.todo, text).unwrap();
        sandbox
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("todo"));
        for var in [
            "TODOTXT_TODO_FILE",
            "TODOTXT_ARCHIVE_FILE",
            "TODOTXT_PREFERENCES_FILE",
            "TODOTXT_DEFAULT_SORT",
            "TODOTXT_PREPEND_CREATION_DATE",
            "TODOTXT_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd.arg("--file")
            .arg(&self.todo)
            .arg("--prefs")
            .arg(&self.prefs)
            .arg("--config")
            .arg(&self.config);
        cmd
    }

    fn todo_text(&self) -> String {
        fs::read_to_string(&self.todo).unwrap()
    }
}

#[test]
fn test_add_then_list() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["add", "(A)", "Call", "mom", "+family"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1: (A) Call mom +family"));

    assert_eq!(sandbox.todo_text(), "(A) Call mom +family\n");

    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 (A) Call mom +family"))
        .stdout(predicate::str::contains("1 of 1 tasks shown"));
}

#[test]
fn test_naked_invocation_lists() {
    let sandbox = Sandbox::with_tasks("Buy milk\n");
    sandbox
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("1 Buy milk"));
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let sandbox = Sandbox::with_tasks("Buy milk\n");
    sandbox
        .cmd()
        .args(["list", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 Buy milk"))
        .stdout(predicate::str::contains("Loaded task list").not())
        .stderr(predicate::str::contains("Loaded task list"));
}

#[test]
fn test_missing_todo_file_lists_nothing() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 of 0 tasks shown"));
    assert!(!sandbox.todo.exists());
}

#[test]
fn test_do_and_undo() {
    let sandbox = Sandbox::with_tasks("Pay rent\n(B) Water plants\n");

    sandbox.cmd().args(["do", "2"]).assert().success();
    let text = sandbox.todo_text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Pay rent");
    assert!(lines[1].starts_with("x "));
    assert!(lines[1].ends_with("(B) Water plants"));

    sandbox.cmd().args(["undo", "2"]).assert().success();
    assert_eq!(sandbox.todo_text(), "Pay rent\n(B) Water plants\n");
}

#[test]
fn test_priority_commands() {
    let sandbox = Sandbox::with_tasks("Pay rent\nSweep\n");

    sandbox.cmd().args(["pri", "1", "b"]).assert().success();
    assert_eq!(sandbox.todo_text(), "(B) Pay rent\nSweep\n");

    sandbox.cmd().args(["raise", "1"]).assert().success();
    assert_eq!(sandbox.todo_text(), "(A) Pay rent\nSweep\n");

    sandbox.cmd().args(["lower", "1", "2"]).assert().success();
    assert_eq!(sandbox.todo_text(), "(B) Pay rent\n(A) Sweep\n");

    sandbox.cmd().args(["depri", "1", "2"]).assert().success();
    assert_eq!(sandbox.todo_text(), "Pay rent\nSweep\n");
}

#[test]
fn test_bad_priority_letter_fails() {
    let sandbox = Sandbox::with_tasks("Pay rent\n");
    sandbox
        .cmd()
        .args(["pri", "1", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    assert_eq!(sandbox.todo_text(), "Pay rent\n");
}

#[test]
fn test_due_dates() {
    let sandbox = Sandbox::with_tasks("Pay rent\n");

    sandbox
        .cmd()
        .args(["due", "1", "2024-01-31"])
        .assert()
        .success();
    assert_eq!(sandbox.todo_text(), "Pay rent due:2024-01-31\n");

    sandbox
        .cmd()
        .args(["postpone", "1", "--days", "1"])
        .assert()
        .success();
    assert_eq!(sandbox.todo_text(), "Pay rent due:2024-02-01\n");

    sandbox
        .cmd()
        .args(["postpone", "1", "--days", "-2"])
        .assert()
        .success();
    assert_eq!(sandbox.todo_text(), "Pay rent due:2024-01-30\n");

    sandbox.cmd().args(["undue", "1"]).assert().success();
    assert!(!sandbox.todo_text().contains("due:"));
}

#[test]
fn test_due_phrase_is_resolved() {
    let sandbox = Sandbox::with_tasks("Pay rent\n");
    sandbox.cmd().args(["due", "1", "tomorrow"]).assert().success();
    assert!(sandbox.todo_text().starts_with("Pay rent due:"));
}

#[test]
fn test_unrecognized_due_fails() {
    let sandbox = Sandbox::with_tasks("Pay rent\n");
    sandbox
        .cmd()
        .args(["due", "1", "someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized date: someday"));
    assert_eq!(sandbox.todo_text(), "Pay rent\n");
}

#[test]
fn test_unknown_task_number_fails() {
    let sandbox = Sandbox::with_tasks("Pay rent\n");
    sandbox
        .cmd()
        .args(["do", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No task 5"));

    sandbox
        .cmd()
        .args(["do", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("start at 1"));
}

#[test]
fn test_append() {
    let sandbox = Sandbox::with_tasks("Pay rent\n");
    sandbox
        .cmd()
        .args(["append", "1", "@bank", "+bills"])
        .assert()
        .success();
    assert_eq!(sandbox.todo_text(), "Pay rent @bank +bills\n");
}

#[test]
fn test_archive_moves_completed_lines() {
    let sandbox = Sandbox::with_tasks("x 2024-06-01 Done thing\nOpen thing\nx Another\n");

    sandbox
        .cmd()
        .arg("archive")
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived 2 tasks"));

    assert_eq!(sandbox.todo_text(), "Open thing\n");
    let done = fs::read_to_string(sandbox.todo.with_file_name("done.txt")).unwrap();
    assert_eq!(done, "x 2024-06-01 Done thing\nx Another\n");

    sandbox
        .cmd()
        .arg("archive")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to archive"));
}

#[test]
fn test_stats_json() {
    let sandbox = Sandbox::with_tasks(
        "(A) Pay rent +bills @home due:2000-01-01\nSweep +home\nx Done +bills\n",
    );

    let output = sandbox.cmd().args(["stats", "--json"]).output().unwrap();
    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["total_task_count"], 3);
    assert_eq!(stats["completed_task_count"], 1);
    assert_eq!(stats["overdue_task_count"], 1);
    assert_eq!(stats["projects"][0]["name"], "bills");
    assert_eq!(stats["projects"][0]["count"], 2);
    assert_eq!(stats["priorities"][0]["name"], "A");
}

#[test]
fn test_stats_text() {
    let sandbox = Sandbox::with_tasks("Sweep +home @house\n");
    sandbox
        .cmd()
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tasks: 1 (0 done, 1 open)"))
        .stdout(predicate::str::contains("+home (1)"))
        .stdout(predicate::str::contains("@house (1)"));
}

#[test]
fn test_search_filters_list() {
    let sandbox = Sandbox::with_tasks("Pay rent +bills\nSweep +home\n");
    sandbox
        .cmd()
        .args(["list", "--search", "rent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pay rent"))
        .stdout(predicate::str::contains("Sweep").not())
        .stdout(predicate::str::contains("1 of 2 tasks shown"));
}

#[test]
fn test_preset_flow() {
    let sandbox = Sandbox::with_tasks("Pay rent +bills\nSweep +home\nx Pay phone +bills\n");

    sandbox
        .cmd()
        .args(["preset", "set", "1", "--search", "+bills", "--hide-completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved preset 1"));

    sandbox
        .cmd()
        .args(["list", "--preset", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pay rent"))
        .stdout(predicate::str::contains("Sweep").not())
        .stdout(predicate::str::contains("Pay phone").not());

    // the active preset sticks
    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 3 tasks shown"));

    sandbox
        .cmd()
        .args(["preset", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*1:"))
        .stdout(predicate::str::contains(" 0: {\"op\":\"all\"}"));

    sandbox
        .cmd()
        .args(["list", "--preset", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 of 3 tasks shown"));
}

#[test]
fn test_preset_reset_active_shows_everything() {
    let sandbox = Sandbox::with_tasks("Pay rent +bills\nSweep +home\n");
    sandbox
        .cmd()
        .args(["preset", "set", "2", "--search", "+home"])
        .assert()
        .success();
    sandbox.cmd().args(["preset", "use", "2"]).assert().success();
    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 2 tasks shown"));

    sandbox.cmd().args(["preset", "reset", "2"]).assert().success();
    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 2 tasks shown"));
}

#[test]
fn test_preset_json_source() {
    let sandbox = Sandbox::with_tasks("(A) Top\nPlain\n");
    sandbox
        .cmd()
        .args([
            "preset",
            "set",
            "3",
            "--json",
            r#"{"op":"compare","args":{"attr":"priority","op":"eq","value":{"type":"letter","value":"A"}}}"#,
        ])
        .assert()
        .success();
    sandbox
        .cmd()
        .args(["list", "--preset", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(A) Top"))
        .stdout(predicate::str::contains("Plain").not());
}

#[test]
fn test_preset_number_out_of_range_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["preset", "use", "12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

#[test]
fn test_sort_choice_is_remembered() {
    let sandbox = Sandbox::with_tasks("b task\n(A) a task\nc task\n");

    let first = sandbox
        .cmd()
        .args(["list", "--sort", "alphabetical"])
        .output()
        .unwrap();
    let first = String::from_utf8(first.stdout).unwrap();
    let lines: Vec<&str> = first.lines().collect();
    assert_eq!(&lines[..3], ["2 (A) a task", "1 b task", "3 c task"]);

    let again = sandbox.cmd().arg("list").output().unwrap();
    assert_eq!(String::from_utf8(again.stdout).unwrap(), first);
}

#[test]
fn test_unknown_sort_fails() {
    let sandbox = Sandbox::with_tasks("b task\n");
    sandbox
        .cmd()
        .args(["list", "--sort", "by-mood"])
        .assert()
        .failure();
}

#[test]
fn test_config_file_is_read() {
    let sandbox = Sandbox::with_tasks("");
    fs::write(&sandbox.config, "prepend_creation_date = true\n").unwrap();
    sandbox.cmd().args(["add", "Dated"]).assert().success();
    let text = sandbox.todo_text();
    assert_eq!(text.len(), "2024-01-01 Dated\n".len());
    assert!(text.ends_with(" Dated\n"));
}

#[test]
fn test_config_template() {
    Sandbox::new()
        .cmd()
        .args(["config", "template"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_sort"));
}
