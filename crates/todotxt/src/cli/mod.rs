//! # CLI Behavior
//!
//! This is **one possible UI client** for todotxtapp, not the application itself.
//! The CLI is the only place that knows about files, terminal I/O, exit codes and
//! output formatting.
//!
//! ## Task Numbers
//!
//! Tasks are addressed by their line number in the todo file, starting at 1, the
//! way `list` prints them. The core numbers from 0; the conversion happens here.
//!
//! ## Naked Execution (`todo`)
//!
//! Running `todo` with no arguments defaults to `todo list`.
//!
//! ## Files
//!
//! | File | Flag | Config key | Fallback |
//! |------|------|------------|----------|
//! | task list | `--file` | `todo_file` | `todo.txt` in the data directory |
//! | archive | | `archive_file` | `done.txt` next to the task list |
//! | preferences | `--prefs` | `preferences_file` | `preferences.json` in the data directory |
//!
//! A missing task list is treated as empty and created on first write.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Context setup and per-command handlers
//! - `files`: Reading and atomically writing text files
//! - `prefs`: JSON file preference store
//! - `render`: Output formatting

mod commands;
mod files;
mod prefs;
mod render;
pub mod setup;

pub use commands::run;
