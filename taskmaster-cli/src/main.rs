use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use taskmaster_core::{JsonFileStorage, MemoryStorage, TaskId, TaskStore, init_logging};

mod commands;
mod config;
mod state;
mod tui;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "taskmaster",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TASKMASTER_BUILD_SHA"), ")"),
    about = "Task Master: a terminal task list with a progress dashboard"
)]
struct Cli {
    /// Keep tasks in memory only; nothing is read or written
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Task(TaskCommand),

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum TaskCommand {
    /// Open the interactive dashboard (default)
    Tui,

    /// Add a task
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List tasks, newest first
    List {
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Flip a task between pending and completed
    Toggle { id: TaskId },

    /// Replace a task's text
    Edit {
        id: TaskId,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Delete a task
    Rm { id: TaskId },

    /// Show total / pending / completed counts and progress
    Stats {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Task(TaskCommand::Tui)) {
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(),
            ConfigCommand::Show => config::show_config(),
        },
        Command::Task(command) => run_task(command, cli.ephemeral),
    }
}

fn run_task(command: TaskCommand, ephemeral: bool) -> Result<()> {
    let cfg = config::load_config()?;
    init_logging(&cfg.log.level, &state::logs_dir()?).context("init logging")?;

    let mut store = open_store(&cfg, ephemeral)?;
    let before = store.snapshot();

    let output = match command {
        TaskCommand::Tui => return tui::run_tui(store, &cfg.ui),
        TaskCommand::Add { text } => commands::add(&mut store, &text),
        TaskCommand::List { json } => commands::list(&before, json)?,
        TaskCommand::Toggle { id } => commands::toggle(&mut store, &before, id),
        TaskCommand::Edit { id, text } => commands::edit(&mut store, &before, id, &text),
        TaskCommand::Rm { id } => commands::remove(&mut store, id),
        TaskCommand::Stats { json } => commands::stats(&before, json)?,
    };
    println!("{output}");
    Ok(())
}

fn open_store(cfg: &Config, ephemeral: bool) -> Result<TaskStore> {
    if ephemeral {
        info!("event=storage_select module=cli slot=memory");
        return Ok(TaskStore::open(MemoryStorage::new()));
    }
    let home = state::ensure_taskmaster_home()?;
    let storage = JsonFileStorage::new(cfg.storage_dir(&home), &cfg.storage.key);
    info!(
        "event=storage_select module=cli slot=file path={}",
        storage.path().display()
    );
    Ok(TaskStore::open(storage))
}
