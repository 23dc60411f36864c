//! Terminal shell over `tasknest_core`.
//!
//! Drives the store and session state the same way a desktop shell would:
//! restore the last selection on start, persist it whenever it changes.

mod commands;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use std::path::PathBuf;
use tasknest_core::{default_log_level, init_logging, DataPaths, SessionState, Store};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "tasknest")]
#[command(version, about = "Organize tasks under categories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding the task database, session state and logs
    #[arg(long, global = true, env = "TASKNEST_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Show categories and the tasks of the selected category
    Show,

    /// Make a category the active one
    Select {
        /// Category id
        id: Uuid,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// List categories in creation order
    List,

    /// Create a category
    Add {
        name: String,

        #[arg(long)]
        icon: Option<String>,

        /// Color value, defaults to #3498db
        #[arg(long)]
        color: Option<String>,
    },

    /// Rename or restyle a category; omitted options keep their current values
    Edit {
        id: Uuid,

        name: String,

        #[arg(long)]
        icon: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a category and all of its tasks
    Delete { id: Uuid },
}

#[derive(Subcommand)]
enum TaskAction {
    /// List tasks of a category (defaults to the selected one)
    List {
        #[arg(long)]
        category: Option<Uuid>,
    },

    /// Create a task
    Add {
        /// Owning category id (defaults to the selected one)
        #[arg(long)]
        category: Option<Uuid>,

        title: String,

        #[arg(short, long)]
        description: Option<String>,

        /// low, medium or high (defaults to medium)
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Edit a task; omitted options keep their current values
    Edit {
        id: Uuid,

        title: String,

        /// New description, "" clears it
        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Flip the completion state of a task
    Toggle { id: Uuid },

    /// Delete a task
    Delete { id: Uuid },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = DataPaths::new(resolve_data_dir(cli.data_dir)?);
    paths
        .ensure_exists()
        .with_context(|| format!("failed to create {}", paths.data_dir().display()))?;

    let paths = DataPaths::new(paths.data_dir().canonicalize()?);

    // Logging is diagnostics only; the shell keeps working without it.
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, &paths.log_dir()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let store = Store::open(paths.db_path())
        .with_context(|| format!("failed to open {}", paths.db_path().display()))?;
    let session = SessionState::new(paths.session_path());
    let shell = commands::Shell::new(&store, &session);

    match cli.command {
        Command::Show => shell.show(),
        Command::Select { id } => shell.select(id),
        Command::Category { action } => match action {
            CategoryAction::List => shell.list_categories(),
            CategoryAction::Add { name, icon, color } => {
                shell.add_category(&name, icon.as_deref(), color.as_deref())
            }
            CategoryAction::Edit {
                id,
                name,
                icon,
                color,
            } => shell.edit_category(id, &name, icon.as_deref(), color.as_deref()),
            CategoryAction::Delete { id } => shell.delete_category(id),
        },
        Command::Task { action } => match action {
            TaskAction::List { category } => shell.list_tasks(category),
            TaskAction::Add {
                category,
                title,
                description,
                priority,
            } => shell.add_task(
                category,
                &title,
                description.as_deref(),
                priority.as_deref(),
            ),
            TaskAction::Edit {
                id,
                title,
                description,
                priority,
            } => shell.edit_task(id, &title, description.as_deref(), priority.as_deref()),
            TaskAction::Toggle { id } => shell.toggle_task(id),
            TaskAction::Delete { id } => shell.delete_task(id),
        },
    }
}

fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    ProjectDirs::from("", "", "tasknest")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| anyhow!("no home directory found; pass --data-dir"))
}
