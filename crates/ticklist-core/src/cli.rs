use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "ticklist",
    version,
    about = "Ticklist: a small task-list manager",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Config file to read instead of the default location.
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Data directory holding the stored state.
    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the sidebar, the current view and the selected task.
    Show {
        #[arg(long, short = 's', default_value = "")]
        search: String,
    },
    /// Add a task to the current view; prompts when no title is given.
    Add { title: Option<String> },
    /// Flip a task between done and open.
    Toggle { id: String },
    /// Edit task fields. An empty `--list` or `--due` clears the field.
    Edit(EditArgs),
    Delete { id: String },
    /// Select a task for the detail panel.
    Select { id: String },
    /// Switch to `today`, `upcoming` or a list id.
    View { view: String },
    #[command(subcommand)]
    Subtask(SubtaskCommand),
    /// Attach a registry tag to a task, or the first one it lacks.
    TagTask { task: String, tag: Option<String> },
    #[command(subcommand)]
    List(ListCommand),
    #[command(subcommand)]
    Tag(TagCommand),
    /// Print the theme, or flip it with `--toggle`.
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long = "desc")]
    pub description: Option<String>,
    #[arg(long)]
    pub list: Option<String>,
    /// Due date as YYYY-MM-DD.
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SubtaskCommand {
    Add { task: String, text: Option<String> },
    Toggle { task: String, index: usize },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ListCommand {
    Add { name: Option<String> },
    Delete { id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TagCommand {
    Add { name: Option<String> },
    Remove { name: String },
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
