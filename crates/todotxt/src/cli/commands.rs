//! # Command Dispatch
//!
//! `run` wires the process together: logging, configuration, file locations, then
//! one handler per subcommand. Handlers load the task list, apply the core
//! operation, write the file back when something changed and print the result.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context as _, Result};
use chrono::NaiveDate;
use confique::Config;
use directories::ProjectDirs;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use todotxtapp::attributes::AttrValue;
use todotxtapp::config::{TodoConfig, CONFIG_FILE_NAME};
use todotxtapp::dates;
use todotxtapp::filter::{combine, search_predicate, FilterPresets, Predicate, PRESET_COUNT};
use todotxtapp::sort::{load_sort_type, save_sort_type, SortType};
use todotxtapp::tasklist::TaskList;
use todotxtapp::Task;

use super::files::{append_lines, read_text, write_atomic};
use super::prefs::JsonFileStore;
use super::render::{render_presets, render_stats, render_task_list, Styles};
use super::setup::{parse_cli, Cli, Commands, ConfigCommands, PresetCommands};

const LOG_ENV: &str = "TODOTXT_LOG";
const TODO_FILE_NAME: &str = "todo.txt";
const ARCHIVE_FILE_NAME: &str = "done.txt";
const PREFS_FILE_NAME: &str = "preferences.json";

pub fn run() -> Result<()> {
    let cli = parse_cli();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let ctx = Context::new(&cli, config)?;
    debug!(
        todo = %ctx.todo_path.display(),
        archive = %ctx.archive_path.display(),
        prefs = %ctx.prefs_path.display(),
        "Resolved files"
    );

    match cli.command {
        None => ctx.list(None, None, None),
        Some(Commands::List {
            sort,
            preset,
            search,
        }) => ctx.list(sort.as_deref(), preset, search.as_deref()),
        Some(Commands::Add { text }) => ctx.add(&text.join(" ")),
        Some(Commands::Do { ids }) => ctx.update(&ids, "Completed", |task, today| {
            task.mark_complete_on(today);
            Ok(())
        }),
        Some(Commands::Undo { ids }) => ctx.update(&ids, "Reopened", |task, _| {
            task.mark_incomplete();
            Ok(())
        }),
        Some(Commands::Pri { id, priority }) => {
            let priority = priority.to_ascii_uppercase();
            ctx.update(&[id], "Prioritized", |task, _| task.set_priority(priority))
        }
        Some(Commands::Depri { ids }) => ctx.update(&ids, "Deprioritized", |task, _| {
            task.remove_priority();
            Ok(())
        }),
        Some(Commands::Raise { ids }) => ctx.update(&ids, "Raised", |task, _| {
            task.increase_priority();
            Ok(())
        }),
        Some(Commands::Lower { ids }) => ctx.update(&ids, "Lowered", |task, _| {
            task.decrease_priority();
            Ok(())
        }),
        Some(Commands::Due { id, date }) => {
            let input = date.join(" ");
            let due = dates::resolve_date_input(&input, ctx.today)
                .ok_or_else(|| anyhow!("Unrecognized date: {input}"))?;
            ctx.update(&[id], "Updated", |task, _| {
                task.set_due_date(due);
                Ok(())
            })
        }
        Some(Commands::Undue { ids }) => ctx.update(&ids, "Updated", |task, _| {
            task.remove_due_date();
            Ok(())
        }),
        Some(Commands::Postpone { ids, days }) => ctx.update(&ids, "Postponed", |task, today| {
            task.postpone_on(days, today);
            Ok(())
        }),
        Some(Commands::Append { id, text }) => {
            let addition = text.join(" ");
            ctx.update(&[id], "Updated", |task, _| {
                task.append_text(&addition);
                Ok(())
            })
        }
        Some(Commands::Archive) => ctx.archive(),
        Some(Commands::Stats { json }) => ctx.stats(json),
        Some(Commands::Preset { action }) => ctx.preset(action),
        Some(Commands::Config { action }) => ctx.config_command(action),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .ok();
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("org", "todotxt", "todotxt")
        .ok_or_else(|| anyhow!("Could not determine the home directory"))
}

fn load_config(explicit: Option<&Path>) -> Result<TodoConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => project_dirs()?.config_dir().join(CONFIG_FILE_NAME),
    };
    debug!(path = %path.display(), "Loading configuration");
    TodoConfig::builder()
        .env()
        .file(&path)
        .load()
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

struct Context {
    config: TodoConfig,
    todo_path: PathBuf,
    archive_path: PathBuf,
    prefs_path: PathBuf,
    prefs: JsonFileStore,
    styles: Styles,
    today: NaiveDate,
}

impl Context {
    fn new(cli: &Cli, config: TodoConfig) -> Result<Self> {
        let todo_path = match cli.file.clone().or_else(|| config.todo_file.clone()) {
            Some(path) => path,
            None => project_dirs()?.data_dir().join(TODO_FILE_NAME),
        };
        let archive_path = config
            .archive_file
            .clone()
            .unwrap_or_else(|| todo_path.with_file_name(ARCHIVE_FILE_NAME));
        let prefs_path = match cli.prefs.clone().or_else(|| config.preferences_file.clone()) {
            Some(path) => path,
            None => project_dirs()?.data_dir().join(PREFS_FILE_NAME),
        };

        Ok(Self {
            config,
            todo_path,
            archive_path,
            prefs: JsonFileStore::new(&prefs_path),
            prefs_path,
            styles: Styles::for_stdout(),
            today: dates::today(),
        })
    }

    fn load_tasks(&self) -> Result<TaskList> {
        Ok(TaskList::from_text(&read_text(&self.todo_path)?))
    }

    fn save_tasks(&self, list: &TaskList) -> Result<()> {
        write_atomic(&self.todo_path, &list.to_text())
    }

    fn presets(&self) -> FilterPresets<&JsonFileStore> {
        FilterPresets::new(&self.prefs)
    }

    fn list(&self, sort: Option<&str>, preset: Option<u8>, search: Option<&str>) -> Result<()> {
        let sort = self.resolve_sort(sort)?;
        let presets = self.presets();
        let active = match preset {
            Some(number) => presets.activate(number)?,
            None => presets.active()?,
        };
        let predicate = match search {
            Some(query) => combine(active, search_predicate(query)),
            None => active,
        };

        let list = self.load_tasks()?;
        let shown = list.view_on(sort, &predicate, self.today);
        print!(
            "{}",
            render_task_list(&shown, list.len(), &self.styles, self.today)
        );
        Ok(())
    }

    fn resolve_sort(&self, requested: Option<&str>) -> Result<SortType> {
        if let Some(name) = requested {
            let sort: SortType = name.parse()?;
            save_sort_type(&self.prefs, sort)?;
            return Ok(sort);
        }
        match load_sort_type(&self.prefs)? {
            Some(sort) => Ok(sort),
            None => Ok(self
                .config
                .default_sort()
                .context("Invalid default_sort in configuration")?),
        }
    }

    fn add(&self, text: &str) -> Result<()> {
        let mut list = self.load_tasks()?;
        let date = self.config.prepend_creation_date.then_some(self.today);
        let ids = list.add(text, date);
        if ids.is_empty() {
            bail!("Nothing to add");
        }
        self.save_tasks(&list)?;
        for id in ids {
            if let Some(task) = list.get(id) {
                println!("Added {}: {}", id + 1, task.raw_text());
            }
        }
        Ok(())
    }

    /// Applies `f` to the tasks with these 1-based numbers and saves the list.
    fn update<F>(&self, numbers: &[usize], verb: &str, mut f: F) -> Result<()>
    where
        F: FnMut(&mut Task, NaiveDate) -> todotxtapp::Result<()>,
    {
        let ids = to_ids(numbers)?;
        let mut list = self.load_tasks()?;
        if let Some(number) = numbers.iter().find(|n| **n > list.len()) {
            bail!("No task {number}; the list has {} tasks", list.len());
        }
        let today = self.today;
        list.update(&ids, |task| f(task, today))?;

        self.save_tasks(&list)?;
        for id in ids {
            if let Some(task) = list.get(id) {
                println!("{} {}: {}", verb, id + 1, task.raw_text());
            }
        }
        Ok(())
    }

    fn archive(&self) -> Result<()> {
        let mut list = self.load_tasks()?;
        let archived = list.archive_completed();
        if archived.is_empty() {
            println!("Nothing to archive");
            return Ok(());
        }
        append_lines(&self.archive_path, &archived, list.line_ending().as_str())?;
        self.save_tasks(&list)?;
        println!(
            "Archived {} tasks to {}",
            archived.len(),
            self.archive_path.display()
        );
        Ok(())
    }

    fn stats(&self, json: bool) -> Result<()> {
        let list = self.load_tasks()?;
        let active = self.presets().active()?;
        let meta = list.filtered_metadata_on(&active, self.today);
        if json {
            println!("{}", serde_json::to_string_pretty(&meta)?);
        } else {
            print!("{}", render_stats(&meta, &self.styles));
        }
        Ok(())
    }

    fn preset(&self, action: PresetCommands) -> Result<()> {
        let presets = self.presets();
        match action {
            PresetCommands::Show { number } => {
                let numbers: Vec<u8> = match number {
                    Some(n) => vec![n],
                    None => (0..=PRESET_COUNT).collect(),
                };
                let mut shown = Vec::with_capacity(numbers.len());
                for n in numbers {
                    shown.push((n, presets.get(n)?));
                }
                print!("{}", render_presets(&shown, presets.active_number()?));
            }
            PresetCommands::Set {
                number,
                search,
                json,
                hide_completed,
            } => {
                let mut predicate = match (search, json) {
                    (Some(query), _) => search_predicate(&query),
                    (None, Some(json)) => serde_json::from_str::<Predicate>(&json)
                        .context("Invalid predicate JSON")?,
                    (None, None) => bail!("Give --search or --json"),
                };
                if hide_completed {
                    predicate = Predicate::And(vec![
                        Predicate::eq("completed", AttrValue::Bool(false)),
                        predicate,
                    ]);
                }
                presets.set(number, &predicate)?;
                if presets.active_number()? == number {
                    presets.activate(number)?;
                }
                println!("Saved preset {number}");
            }
            PresetCommands::Reset { number } => {
                presets.reset(number)?;
                if number != 0 && presets.active_number()? == number {
                    presets.activate(number)?;
                }
                println!("Reset preset {number}");
            }
            PresetCommands::ResetAll => {
                presets.reset_all()?;
                presets.activate(presets.active_number()?)?;
                println!("Reset all presets");
            }
            PresetCommands::Use { number } => {
                presets.activate(number)?;
                println!("Using preset {number}");
            }
        }
        Ok(())
    }

    fn config_command(&self, action: Option<ConfigCommands>) -> Result<()> {
        match action.unwrap_or(ConfigCommands::Show) {
            ConfigCommands::Show => {
                print!("{}", toml::to_string(&self.config)?);
                println!("# todo file: {}", self.todo_path.display());
                println!("# archive file: {}", self.archive_path.display());
                println!("# preferences file: {}", self.prefs_path.display());
            }
            ConfigCommands::Template => print!("{}", TodoConfig::template()),
        }
        Ok(())
    }
}

/// Converts 1-based task numbers to core ids.
fn to_ids(numbers: &[usize]) -> Result<Vec<usize>> {
    numbers
        .iter()
        .map(|n| {
            n.checked_sub(1)
                .ok_or_else(|| anyhow!("Task numbers start at 1"))
        })
        .collect()
}
