//! # todo CLI Architecture
//!
//! The `todo` binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! todotxt is organized as a Cargo workspace with two crates:
//! - `crates/todotxtapp/`: Core library: parsing, sorting, filtering, statistics
//! - `crates/todotxt/`: This CLI tool, depends on the `todotxtapp` library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/todotxt/src/cli/)                        │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Files: todo.txt, archive, prefs (files.rs, prefs.rs)     │
//! │  - Terminal rendering (render.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (crates/todotxtapp)                                   │
//! │  - TaskList, sort, filter presets, metadata                 │
//! │  - No knowledge of files, stdout/stderr or process exits    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI layer is responsible for **all** user-facing concerns: argument parsing,
//! locating and writing files, error reporting and rendering.
//!
//! ## Testing Approach
//!
//! - **Core**: unit and integration tests in `crates/todotxtapp`.
//! - **CLI**: rendering and argument parsing are unit tested in place; end-to-end
//!   tests in `tests/` run the binary against temporary files.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
