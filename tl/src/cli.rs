//! CLI argument parsing for tasklist

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::codec::Format;
use crate::domain::{FilterStatus, TaskId};

#[derive(Parser, Debug)]
#[command(name = "tl")]
#[command(author, version, about = "Keep a task list in a JSON file", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Task file to use instead of the configured one
    #[arg(short, long, global = true)]
    pub store: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    Add {
        /// Task title
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// List tasks
    List {
        /// Which tasks to show: all, active or completed
        #[arg(short, long)]
        filter: Option<FilterStatus>,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Mark a task completed
    Done {
        #[arg(required = true)]
        id: TaskId,
    },

    /// Mark a task active again
    Undo {
        #[arg(required = true)]
        id: TaskId,
    },

    /// Flip a task between active and completed
    Toggle {
        #[arg(required = true)]
        id: TaskId,
    },

    /// Change a task's title
    Edit {
        #[arg(required = true)]
        id: TaskId,

        /// New title
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Remove {
        #[arg(required = true)]
        id: TaskId,
    },

    /// Delete every completed task
    ClearCompleted,

    /// Move a task directly before another one
    Move {
        /// Task to move
        #[arg(required = true)]
        id: TaskId,

        /// Task it should precede
        #[arg(short, long, required = true)]
        before: TaskId,
    },

    /// Show how many tasks are in each view
    Count,

    /// Write tasks to stdout or a file
    Export {
        /// Encoding: json or jsonl
        #[arg(long, default_value = "json")]
        format: Format,

        /// Which tasks to export: all, active or completed
        #[arg(short, long)]
        filter: Option<FilterStatus>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Read tasks from a file
    Import {
        /// File to read
        #[arg(required = true)]
        path: PathBuf,

        /// Encoding: json or jsonl
        #[arg(long, default_value = "json")]
        format: Format,

        /// Replace the whole list instead of appending
        #[arg(long)]
        replace: bool,
    },
}

/// Output format for list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
