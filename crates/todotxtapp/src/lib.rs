//! # todotxtapp Architecture
//!
//! todotxtapp is a **UI-agnostic todo.txt engine**. It knows how to read and rewrite
//! task lines, order them, filter them and summarize them. It does not know where the
//! lines come from or where they go: loading and saving files, undo stacks, windows and
//! terminals all belong to the client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (crates/todotxt, or any other UI)                   │
//! │  - Reads/writes todo.txt files, owns the preference medium  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  TaskList (tasklist.rs)                                     │
//! │  - Ordered tasks with positional ids, change notifications  │
//! │  - Views (filter + sort), archive, statistics               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engines: sort.rs, filter/, metadata.rs                     │
//! │  - Pure functions over `&[Task]`                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model: model.rs, grammar.rs, mutations.rs, dates.rs        │
//! │  - One line in, structured attributes out, and back again   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O in the Core
//!
//! Everything in this crate:
//! - Takes regular Rust values and returns regular Rust values
//! - **Never** opens files, reads stdin, or writes stdout/stderr
//! - Receives persistent preferences through an explicit [`store::KeyValueStore`] handle
//!
//! The only fallible caller-facing operations are the ones taking structured arguments
//! (for example [`model::Task::set_priority`]) and preset storage. Parsing never fails:
//! anything that does not fit the grammar is kept as free text.
//!
//! ## Time
//!
//! Due and threshold states depend on "today". Every date-sensitive operation has an
//! `*_on(today)` variant taking the date explicitly; the plain variant reads the local
//! calendar through [`dates::today`]. Tests always use the explicit variants.
//!
//! ## Module Overview
//!
//! - [`model`]: [`model::Task`], due/threshold states, parse and serialize
//! - [`grammar`]: low-level scanning of the line prefix and free-text tokens
//! - [`mutations`]: priority, completion and due date mutators
//! - [`dates`]: strict date parsing and natural-language date phrases
//! - [`attributes`]: named, typed access to task attributes
//! - [`sort`]: the nine sort orders
//! - [`filter`]: predicate trees, search, presets
//! - [`metadata`]: task list statistics
//! - [`tasklist`]: the I/O-free document
//! - [`store`]: key/value preference storage
//! - [`config`]: configuration schema
//! - [`error`]: error types

pub mod attributes;
pub mod config;
pub mod dates;
pub mod error;
pub mod filter;
pub mod grammar;
pub mod metadata;
pub mod model;
pub mod mutations;
pub mod sort;
pub mod store;
pub mod tasklist;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use error::{Result, TodoError};
pub use model::{DueState, Task, ThresholdState};
