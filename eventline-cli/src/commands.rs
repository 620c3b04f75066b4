use std::path::PathBuf;

use clap::Subcommand;
use eventline_api::{ResourceType, CONTEXT_PATH};

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current account, or another one by id.
    Account {
        #[arg(long)]
        id: Option<String>,
    },
    Accounts {
        #[command(subcommand)]
        command: AccountsCommand,
    },
    /// Show the organization of the current credentials.
    Org,
    Projects {
        #[command(subcommand)]
        command: ProjectsCommand,
    },
    Events {
        #[command(subcommand)]
        command: EventsCommand,
    },
    Pipelines {
        #[command(subcommand)]
        command: PipelinesCommand,
    },
    Scratchpad {
        #[command(subcommand)]
        command: ScratchpadCommand,
    },
    Resources {
        #[command(subcommand)]
        command: ResourcesCommand,
    },
    /// Print the task context and runner environment (inside a task).
    Context {
        #[arg(long, default_value = CONTEXT_PATH)]
        path: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum AccountsCommand {
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    List {
        #[arg(long)]
        after: Option<String>,
        #[arg(long)]
        size: Option<u32>,
    },
    Get {
        /// Project id, or name with --by-name.
        project: String,
        #[arg(long)]
        by_name: bool,
    },
    Create {
        name: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum EventsCommand {
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
        #[arg(long)]
        pipeline_id: Option<String>,
        #[arg(long)]
        connector: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    Get {
        id: String,
    },
    Create {
        connector: String,
        name: String,
        /// Event data as a JSON object.
        #[arg(long, default_value = "{}")]
        data: String,
        /// RFC 3339 event time; now when omitted.
        #[arg(long)]
        time: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum PipelinesCommand {
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },
    Get {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ScratchpadCommand {
    /// Print the whole scratchpad, or one entry when a key is given.
    Get {
        pipeline_id: String,
        key: Option<String>,
    },
    Set {
        pipeline_id: String,
        key: String,
        value: String,
    },
    /// Delete one entry, or the whole scratchpad when no key is given.
    Delete {
        pipeline_id: String,
        key: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ResourcesCommand {
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
        #[arg(long = "type")]
        kind: Option<ResourceType>,
    },
    Get {
        /// Resource id, or name with --by-name.
        resource: String,
        #[arg(long)]
        by_name: bool,
    },
}
