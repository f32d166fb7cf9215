use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "todo",
    bin_name = "todo",
    version,
    disable_help_subcommand = true,
    about = "Manage a todo.txt task list",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path of the todo.txt file
    #[arg(short, long, global = true, value_name = "PATH", help_heading = "Options")]
    pub file: Option<PathBuf>,

    /// Path of the preferences file (presets, sort choice)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub prefs: Option<PathBuf>,

    /// Path of the configuration file
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tasks
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Sort order (name or number 0-8); remembered for next time
        #[arg(long, short = 's')]
        sort: Option<String>,

        /// Activate filter preset 0-9 (0 clears the filter)
        #[arg(long, short = 'p')]
        preset: Option<u8>,

        /// Only show tasks matching every term
        #[arg(long, short = 'q')]
        search: Option<String>,
    },

    /// Add a task
    #[command(alias = "a", display_order = 2)]
    Add {
        /// Task text
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Mark tasks as done
    #[command(display_order = 3)]
    Do {
        /// Task numbers
        #[arg(required = true, num_args = 1..)]
        ids: Vec<usize>,
    },

    /// Mark tasks as not done
    #[command(display_order = 4)]
    Undo {
        /// Task numbers
        #[arg(required = true, num_args = 1..)]
        ids: Vec<usize>,
    },

    /// Set a task's priority
    #[command(display_order = 5)]
    Pri {
        /// Task number
        id: usize,

        /// Priority letter A-Z
        priority: char,
    },

    /// Remove priorities
    #[command(display_order = 6)]
    Depri {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<usize>,
    },

    /// Raise priorities one step (toward A)
    #[command(display_order = 7)]
    Raise {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<usize>,
    },

    /// Lower priorities one step (toward Z)
    #[command(display_order = 8)]
    Lower {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<usize>,
    },

    /// Set a task's due date (yyyy-mm-dd, today, tomorrow, friday, ...)
    #[command(display_order = 9)]
    Due {
        /// Task number
        id: usize,

        /// Date or phrase
        #[arg(required = true, trailing_var_arg = true)]
        date: Vec<String>,
    },

    /// Remove due dates
    #[command(display_order = 10)]
    Undue {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<usize>,
    },

    /// Move due dates by a number of days
    #[command(display_order = 11)]
    Postpone {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<usize>,

        /// Days to move (negative moves earlier)
        #[arg(long, short = 'd', allow_negative_numbers = true, default_value_t = 1)]
        days: i64,
    },

    /// Append text to a task
    #[command(display_order = 12)]
    Append {
        /// Task number
        id: usize,

        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Move completed tasks to the archive file
    #[command(display_order = 20)]
    Archive,

    /// Show task list statistics
    #[command(display_order = 21)]
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage filter presets
    #[command(display_order = 22)]
    Preset {
        #[command(subcommand)]
        action: PresetCommands,
    },

    /// Show configuration
    #[command(display_order = 30)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PresetCommands {
    /// Show one preset, or all of them
    Show { number: Option<u8> },

    /// Save a preset
    #[command(group(
        clap::ArgGroup::new("source").required(true).args(["search", "json"])
    ))]
    Set {
        /// Preset number 1-9
        number: u8,

        /// Build the preset from a search query
        #[arg(long)]
        search: Option<String>,

        /// Predicate as JSON
        #[arg(long)]
        json: Option<String>,

        /// Also hide completed tasks
        #[arg(long)]
        hide_completed: bool,
    },

    /// Restore a preset to "show everything"
    Reset { number: u8 },

    /// Restore every preset
    ResetAll,

    /// Activate a preset for `list`
    Use { number: u8 },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the resolved configuration
    Show,

    /// Print a commented sample configuration file
    Template,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
