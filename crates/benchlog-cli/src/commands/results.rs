use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};

use benchlog_core::results::{merge_results, parse_results};
use benchlog_store::persist::{read_optional, write_atomic};

#[derive(Args)]
pub struct ResultsArgs {
    #[command(subcommand)]
    command: ResultsCommand,
}

#[derive(Subcommand)]
enum ResultsCommand {
    /// Append measurements from result files to another result file
    Merge {
        /// Result file to extend (created if missing)
        #[arg(long)]
        into: PathBuf,
        /// Result files to append, in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

pub fn run(args: ResultsArgs) -> anyhow::Result<()> {
    match args.command {
        ResultsCommand::Merge { into, inputs } => merge(into, inputs),
    }
}

fn merge(into: PathBuf, inputs: Vec<PathBuf>) -> anyhow::Result<()> {
    let mut new = Vec::new();
    for path in &inputs {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let parsed = parse_results(&text).with_context(|| format!("parsing {}", path.display()))?;
        new.extend(parsed);
    }
    let existing = read_optional(&into)?;
    let merged = merge_results(existing.as_deref(), &new)
        .with_context(|| format!("parsing {}", into.display()))?;
    write_atomic(&into, merged.as_bytes())?;
    println!("{}: +{} measurements", into.display(), new.len());
    Ok(())
}
