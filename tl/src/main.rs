use std::fs;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use tasklist::cli::{Cli, Command, OutputFormat};
use tasklist::config::Config;
use tasklist::{FilterCounts, FilterStatus, ImportMode, Task, TaskError, TaskStore, codec};

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    debug!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

fn print_task(task: &Task) {
    let id = task.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
    if task.completed {
        println!("{:>4} {} {}", id.dimmed(), "[x]".green(), task.title.dimmed());
    } else {
        println!("{:>4} {} {}", id.yellow(), "[ ]", task.title);
    }
}

fn print_counts(counts: &FilterCounts) {
    println!(
        "{} active, {} completed, {} total",
        counts.active.to_string().yellow(),
        counts.completed.to_string().green(),
        counts.all
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let store_path = cli.store.clone().unwrap_or_else(|| config.store_path.clone());

    info!(store = %store_path.display(), "tasklist starting");
    let mut store = match TaskStore::try_open(&store_path) {
        Err(TaskError::Locked(path)) => {
            warn!("Waiting for another tl process to release {}", path.display());
            TaskStore::open(&store_path)
        }
        other => other,
    }
    .context(format!("Failed to open task store {}", store_path.display()))?;
    debug!(path = %store.path().display(), count = store.tasks().len(), "Store ready");

    match cli.command {
        Command::Add { title } => {
            let task = store.add(&title.join(" "))?;
            let id = task.id.unwrap_or_default();
            println!("{} Added task #{}: {}", "✓".green(), id.to_string().cyan(), task.title);
        }
        Command::List { filter, format } => {
            let filter = filter.unwrap_or(config.default_filter);
            let tasks = store.list(filter);
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&tasks)?);
                }
                OutputFormat::Text => {
                    if tasks.is_empty() && filter == FilterStatus::All {
                        println!("No tasks");
                    } else if tasks.is_empty() {
                        println!("No {} tasks", filter);
                    } else {
                        for task in tasks {
                            print_task(task);
                        }
                    }
                    print_counts(&store.counts());
                }
            }
        }
        Command::Done { id } => {
            store.set_completed(id, true)?;
            println!("{} Completed task #{}", "✓".green(), id);
        }
        Command::Undo { id } => {
            store.set_completed(id, false)?;
            println!("{} Reopened task #{}", "✓".green(), id);
        }
        Command::Toggle { id } => {
            let completed = store.toggle(id)?;
            let state = if completed { "completed" } else { "active" };
            println!("{} Task #{} is now {}", "✓".green(), id, state);
        }
        Command::Edit { id, title } => {
            store.rename(id, &title.join(" "))?;
            println!("{} Renamed task #{}", "✓".green(), id);
        }
        Command::Remove { id } => {
            let task = store.remove(id)?;
            println!("{} Removed task #{}: {}", "✓".green(), id, task.title);
        }
        Command::ClearCompleted => {
            let removed = store.clear_completed()?;
            println!("{} Cleared {} completed task(s)", "✓".green(), removed);
        }
        Command::Move { id, before } => {
            store.move_before(id, before)?;
            println!("{} Moved task #{} before #{}", "✓".green(), id, before);
        }
        Command::Count => {
            print_counts(&store.counts());
        }
        Command::Export { format, filter, output } => {
            let tasks = store.export(filter.unwrap_or(config.default_filter));
            let content = codec::encode(&tasks, format)?;
            match output {
                Some(path) => {
                    fs::write(&path, content).context(format!("Failed to write {}", path.display()))?;
                    eprintln!("{} Exported {} task(s) to {}", "✓".green(), tasks.len(), path.display());
                }
                None => print!("{}", content),
            }
        }
        Command::Import { path, format, replace } => {
            let content = fs::read_to_string(&path).context(format!("Failed to read {}", path.display()))?;
            let tasks = codec::decode(&content, format).context(format!("Failed to decode {}", path.display()))?;
            let mode = if replace { ImportMode::Replace } else { ImportMode::Append };
            let count = store.import(tasks, mode)?;
            println!("{} Imported {} task(s)", "✓".green(), count);
        }
    }

    Ok(())
}
