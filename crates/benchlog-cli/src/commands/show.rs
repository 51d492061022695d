use std::path::PathBuf;

use clap::Args;

use benchlog_core::{Run, Snapshot};
use benchlog_store::HistoryStore;

use crate::config::resolve_store_dir;
use crate::output::{header, kv, number};

#[derive(Args)]
pub struct ShowArgs {
    /// Store directory (searched upward from the current directory if omitted)
    #[arg(long)]
    dir: Option<PathBuf>,
    /// Only show this suite
    #[arg(long)]
    suite: Option<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ShowArgs) -> anyhow::Result<()> {
    let dir = resolve_store_dir(args.dir)?;
    let store = HistoryStore::open(&dir)?;
    let snapshot = store.load()?;

    let suites: Vec<(&str, &[Run])> = match args.suite.as_deref() {
        Some(name) => {
            let runs = snapshot
                .suite(name)
                .ok_or_else(|| anyhow::anyhow!("suite not found: {}", name))?;
            vec![(name, runs)]
        }
        None => snapshot.entries.iter().collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary_json(&snapshot, &suites))?);
        return Ok(());
    }

    println!("{}", kv("repository", &snapshot.repo_url));
    println!("{}", kv("last update", &snapshot.last_update.to_string()));
    println!("{}", kv("data file", &store.data_file().display().to_string()));
    if suites.is_empty() {
        println!("No runs yet.");
        return Ok(());
    }
    for (name, runs) in suites {
        println!();
        println!("{}", header(name));
        println!("{}", kv("runs", &runs.len().to_string()));
        let Some(latest) = runs.last() else {
            continue;
        };
        println!("{}", kv("latest commit", &latest.commit.id));
        println!("{}", kv("latest date", &latest.date.to_string()));
        let direction = if latest.tool.bigger_is_better() {
            "bigger is better"
        } else {
            "smaller is better"
        };
        println!("{}", kv("tool", &format!("{} ({direction})", latest.tool)));
        for bench in &latest.benches {
            let mut line = format!("{} {}", number(bench.value_f64()), bench.unit);
            if let Some(extra) = &bench.extra {
                line.push_str(&format!(" [{}]", extra.display()));
            }
            println!("    {}: {}", bench.name, line);
        }
    }
    Ok(())
}

fn summary_json(snapshot: &Snapshot, suites: &[(&str, &[Run])]) -> serde_json::Value {
    let suites: Vec<serde_json::Value> = suites
        .iter()
        .map(|(name, runs)| {
            let mut obj = serde_json::json!({
                "suite": name,
                "runs": runs.len(),
            });
            if let Some(latest) = runs.last() {
                obj["latest"] = serde_json::json!({
                    "commit": latest.commit.id,
                    "date": latest.date,
                    "tool": latest.tool.as_str(),
                    "benches": latest.benches,
                });
            }
            obj
        })
        .collect();
    serde_json::json!({
        "repoUrl": snapshot.repo_url,
        "lastUpdate": snapshot.last_update,
        "suites": suites,
    })
}
