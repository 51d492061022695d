use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Args;

use benchlog_core::results::parse_results;
use benchlog_core::{Commit, Identity, Run, RunBuilder, Tool};
use benchlog_store::HistoryStore;

use crate::config::resolve_store_dir;

#[derive(Args)]
pub struct AppendArgs {
    /// Store directory (searched upward from the current directory if omitted)
    #[arg(long)]
    dir: Option<PathBuf>,
    /// Suite to append to
    #[arg(long, default_value = "Benchmark")]
    suite: String,
    /// A complete run as JSON
    #[arg(long, conflicts_with = "results", required_unless_present = "results")]
    run: Option<PathBuf>,
    /// Runner result file (JSON array of measurements)
    #[arg(long)]
    results: Option<PathBuf>,
    #[command(flatten)]
    commit: CommitArgs,
    /// Benchmark tool (e.g. customBiggerIsBetter, customSmallerIsBetter, cargo)
    #[arg(long, default_value = "customBiggerIsBetter")]
    tool: String,
    /// Run date in milliseconds since epoch (defaults to now)
    #[arg(long)]
    date: Option<u64>,
}

#[derive(Args)]
struct CommitArgs {
    /// Commit id
    #[arg(long, required_unless_present = "run")]
    commit_id: Option<String>,
    /// Commit message
    #[arg(long, default_value = "")]
    message: String,
    /// Commit timestamp (ISO-8601)
    #[arg(long, default_value = "")]
    timestamp: String,
    /// Commit URL
    #[arg(long, default_value = "")]
    url: String,
    /// Author name
    #[arg(long, required_unless_present = "run")]
    author: Option<String>,
    #[arg(long)]
    author_username: Option<String>,
    #[arg(long)]
    author_email: Option<String>,
    /// Committer name (defaults to the author)
    #[arg(long)]
    committer: Option<String>,
    #[arg(long)]
    committer_username: Option<String>,
    #[arg(long)]
    committer_email: Option<String>,
}

impl CommitArgs {
    fn into_commit(self) -> anyhow::Result<Commit> {
        let id = self.commit_id.context("--commit-id is required")?;
        let author_name = self.author.context("--author is required")?;
        let author = identity(author_name, self.author_username, self.author_email);
        let committer = match self.committer {
            Some(name) => identity(name, self.committer_username, self.committer_email),
            None => author.clone(),
        };
        Ok(Commit {
            author,
            committer,
            distinct: None,
            id,
            message: self.message,
            timestamp: self.timestamp,
            tree_id: None,
            url: self.url,
        })
    }
}

fn identity(name: String, username: Option<String>, email: Option<String>) -> Identity {
    let mut id = Identity::new(name);
    id.username = username;
    id.email = email;
    id
}

pub fn run(args: AppendArgs) -> anyhow::Result<()> {
    let dir = resolve_store_dir(args.dir)?;
    let store = HistoryStore::open(&dir)?;

    let run = match (args.run, args.results) {
        (Some(path), _) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            Run::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        (None, Some(path)) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let benches =
                parse_results(&text).with_context(|| format!("parsing {}", path.display()))?;
            let date = match args.date {
                Some(date) => date,
                None => now_ms()?,
            };
            RunBuilder::new(args.commit.into_commit()?, Tool::from(args.tool))
                .date(date)
                .benches(benches)
                .build()?
        }
        (None, None) => anyhow::bail!("either --run or --results is required"),
    };

    let commit = run.commit.id.clone();
    let date = run.date;
    let snapshot = store.append(&args.suite, run)?;
    let count = snapshot.suite(&args.suite).map_or(0, <[Run]>::len);
    tracing::debug!("suite '{}' now has {} runs", args.suite, count);
    println!(
        "{}: {} runs (commit {}, date {})",
        args.suite, count, commit, date
    );
    Ok(())
}

fn now_ms() -> anyhow::Result<u64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?;
    Ok(u64::try_from(elapsed.as_millis())?)
}
