use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod output;

use commands::Commands;

#[derive(Parser)]
#[command(
    name = "benchlog",
    version,
    about = "Append-only benchmark history for chart front ends"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = cli.command.run() {
        eprintln!("{}", error::format_error(&err));
        std::process::exit(1);
    }
}
