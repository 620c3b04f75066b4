use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;
mod utils;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "evcli", version, about = "Eventline command-line client")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,
    #[command(flatten)]
    output: OutputArgs,
    /// Log requests to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli));
    std::process::exit(exit_code);
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_command(cli: Cli) -> i32 {
    let Cli {
        connection: conn,
        output,
        command,
        ..
    } = cli;

    match command {
        Command::Account { id } => cmd::account::account_cmd(id.as_deref(), &conn, &output).await,
        Command::Accounts { command } => cmd::account::accounts_cmd(command, &conn, &output).await,
        Command::Org => cmd::org::org_cmd(&conn, &output).await,
        Command::Projects { command } => cmd::projects::projects_cmd(command, &conn, &output).await,
        Command::Events { command } => cmd::events::events_cmd(command, &conn, &output).await,
        Command::Pipelines { command } => cmd::pipelines::pipelines_cmd(command, &conn, &output).await,
        Command::Scratchpad { command } => cmd::scratchpad::scratchpad_cmd(command, &conn, &output).await,
        Command::Resources { command } => cmd::resources::resources_cmd(command, &conn, &output).await,
        Command::Context { path } => cmd::context::context_cmd(&path, &output).await,
    }
}
