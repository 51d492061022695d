use clap::Args;
use std::path::PathBuf;

use benchlog_core::DuplicatePolicy;
use benchlog_store::{HistoryStore, StoreConfig};

#[derive(Args)]
pub struct InitArgs {
    /// Store directory (defaults to ./benchmark)
    #[arg(default_value = "benchmark")]
    path: PathBuf,
    /// URL of the repository being benchmarked
    #[arg(long)]
    repo_url: String,
    /// Global the history is assigned to in the data file
    #[arg(long)]
    variable: Option<String>,
    /// Data file name inside the store directory
    #[arg(long)]
    data_file: Option<String>,
    /// How to treat a run whose commit and date are already recorded
    /// (append, skip, reject)
    #[arg(long)]
    duplicates: Option<DuplicatePolicy>,
}

pub fn run(args: InitArgs) -> anyhow::Result<()> {
    let path = if args.path.is_absolute() {
        args.path
    } else {
        std::env::current_dir()?.join(&args.path)
    };

    let mut config = StoreConfig::new(args.repo_url);
    if let Some(variable) = args.variable {
        config.variable = variable;
    }
    if let Some(data_file) = args.data_file {
        config.data_file = data_file;
    }
    if let Some(policy) = args.duplicates {
        config.duplicates = policy;
    }

    let store = HistoryStore::init(&path, config)?;
    println!(
        "Initialized benchmark store at {} (data file {})",
        path.display(),
        store.data_file().display()
    );
    Ok(())
}
