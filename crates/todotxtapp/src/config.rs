//! # Configuration
//!
//! todotxt configuration is a [`confique`] schema. The core only defines it; the
//! client decides which layers to load (the core does no I/O).
//!
//! ## Layers
//!
//! Configuration is resolved in priority order:
//! 1. **Command line flags** (applied by the client on top of the loaded value)
//! 2. **Environment variables**: `TODOTXT_TODO_FILE`, `TODOTXT_DEFAULT_SORT`, etc.
//! 3. **Config file**: `todotxt.toml` in the OS-appropriate config directory
//! 4. **Compiled Defaults**: `#[config(default = ...)]`
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `todo_file` | `todo.txt` in the data directory | The task list |
//! | `archive_file` | `done.txt` next to the task list | Where `archive` appends completed tasks |
//! | `preferences_file` | `preferences.json` in the data directory | Presets and sort choice |
//! | `default_sort` | `priority` | Sort used when none was chosen yet |
//! | `prepend_creation_date` | `false` | Date new tasks on `add` |

use std::path::PathBuf;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sort::SortType;

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "todotxt.toml";

/// Configuration for todotxt, stored in `todotxt.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TodoConfig {
    /// Path of the todo.txt file.
    #[config(env = "TODOTXT_TODO_FILE")]
    pub todo_file: Option<PathBuf>,

    /// Path of the archive file completed tasks are moved to.
    #[config(env = "TODOTXT_ARCHIVE_FILE")]
    pub archive_file: Option<PathBuf>,

    /// Path of the JSON file holding filter presets and the sort choice.
    #[config(env = "TODOTXT_PREFERENCES_FILE")]
    pub preferences_file: Option<PathBuf>,

    /// Sort order used until one is chosen with `list --sort`.
    #[config(env = "TODOTXT_DEFAULT_SORT", default = "priority")]
    pub default_sort: String,

    /// Give tasks added without a creation date today's date.
    #[config(env = "TODOTXT_PREPEND_CREATION_DATE", default = false)]
    pub prepend_creation_date: bool,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            todo_file: None,
            archive_file: None,
            preferences_file: None,
            default_sort: "priority".to_string(),
            prepend_creation_date: false,
        }
    }
}

impl TodoConfig {
    /// The configured default sort.
    pub fn default_sort(&self) -> Result<SortType> {
        self.default_sort.parse()
    }

    /// A commented sample `todotxt.toml`.
    pub fn template() -> String {
        confique::toml::template::<TodoConfig>(confique::toml::FormatOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TodoError;

    #[test]
    fn test_default_config() {
        let config = TodoConfig::default();
        assert_eq!(config.default_sort, "priority");
        assert!(!config.prepend_creation_date);
        assert_eq!(config.todo_file, None);
        assert_eq!(config.default_sort().unwrap(), SortType::Priority);
    }

    #[test]
    fn test_compiled_defaults_match_default_impl() {
        let loaded = TodoConfig::builder().load().unwrap();
        assert_eq!(loaded, TodoConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: TodoConfig = toml::from_str(
            r#"
            todo_file = "/tmp/todo.txt"
            prepend_creation_date = true
            "#,
        )
        .unwrap();
        assert_eq!(config.todo_file, Some(PathBuf::from("/tmp/todo.txt")));
        assert!(config.prepend_creation_date);
        assert_eq!(config.default_sort, "priority");
    }

    #[test]
    fn test_bad_default_sort() {
        let config = TodoConfig {
            default_sort: "by-mood".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.default_sort(),
            Err(TodoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_template_lists_settings() {
        let template = TodoConfig::template();
        assert!(template.contains("default_sort"));
        assert!(template.contains("prepend_creation_date"));
    }
}
