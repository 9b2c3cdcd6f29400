//! Kalah CLI - Command-line interface
//!
//! Commands:
//! - play: Play a game in the terminal
//! - match: Pit two AI tiers against each other
//! - serve: Start the HTTP server

mod match_cmd;
mod play;
mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kalah")]
#[command(about = "Six-pit Kalah with an alpha-beta opponent")]
struct Cli {
    /// Seed for reproducible AI play
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play(play::PlayArgs),
    /// Play AI-vs-AI games and report the results
    Match(match_cmd::MatchArgs),
    /// Start the HTTP server
    Serve(server::ServerArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::Serve(args) => server::run(args),
    }
}

/// RUST_LOG wins over --verbose when set
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
