use std::path::PathBuf;

use clap::Args;

use benchlog_store::persist::write_atomic;
use benchlog_store::HistoryStore;

use crate::config::resolve_store_dir;

#[derive(Args)]
pub struct ExportArgs {
    /// Store directory (searched upward from the current directory if omitted)
    #[arg(long)]
    dir: Option<PathBuf>,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ExportArgs) -> anyhow::Result<()> {
    let dir = resolve_store_dir(args.dir)?;
    let store = HistoryStore::open(&dir)?;
    let text = store.export()?;
    match args.output {
        Some(path) => {
            write_atomic(&path, text.as_bytes())?;
            tracing::info!("exported history to {}", path.display());
        }
        // the data file has no trailing newline, keep stdout identical
        None => print!("{text}"),
    }
    Ok(())
}
