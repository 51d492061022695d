use std::path::{Path, PathBuf};

use benchlog_store::layout::CONFIG_FILE;

/// Conventional store location inside a repository checkout.
const DEFAULT_SUBDIR: &str = "benchmark";

/// Use `explicit` if given, otherwise find a store by walking up from the
/// current directory, checking each directory and its `benchmark/` child.
pub fn resolve_store_dir(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    find_store_dir(&std::env::current_dir()?)
}

fn find_store_dir(start: &Path) -> anyhow::Result<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        for candidate in [dir.clone(), dir.join(DEFAULT_SUBDIR)] {
            if candidate.join(CONFIG_FILE).is_file() {
                return Ok(candidate);
            }
        }
        if !dir.pop() {
            anyhow::bail!("no benchmark store found (no {CONFIG_FILE}); run `benchlog init` first");
        }
    }
}
