use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{Run, Snapshot};
use crate::CoreError;

/// What to do when a run with the same `(commit.id, date)` already exists in
/// the target suite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Append anyway.
    Append,
    /// Leave the snapshot untouched and report `Skipped`.
    #[default]
    Skip,
    /// Fail with `CoreError::DuplicateRun`.
    Reject,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Skip => "skip",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "append" => Ok(Self::Append),
            "skip" => Ok(Self::Skip),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown duplicate policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The run was stored at `index` within its suite.
    Appended { index: usize },
    /// An identical `(commit.id, date)` was already present.
    Skipped,
}

impl Snapshot {
    /// Append `run` to `suite` and advance `last_update` to the run's date.
    ///
    /// All checks happen before any mutation, so on error the snapshot is
    /// exactly as it was.
    pub fn append(
        &mut self,
        suite: &str,
        run: Run,
        policy: DuplicatePolicy,
    ) -> Result<AppendOutcome, CoreError> {
        let existing = self.entries.get(suite).unwrap_or(&[]);
        validate_shape(suite, &run)?;

        let duplicate = existing
            .iter()
            .any(|r| r.commit.id == run.commit.id && r.date == run.date);
        if duplicate {
            match policy {
                DuplicatePolicy::Append => {}
                DuplicatePolicy::Skip => return Ok(AppendOutcome::Skipped),
                DuplicatePolicy::Reject => {
                    return Err(CoreError::DuplicateRun {
                        suite: suite.to_string(),
                        commit: run.commit.id,
                        date: run.date,
                    })
                }
            }
        }
        validate_order(suite, &run, existing)?;

        let date = run.date;
        let index = self.entries.push(suite, run);
        self.last_update = date;
        Ok(AppendOutcome::Appended { index })
    }
}

/// Checks a run against the suite it is about to join.
pub fn validate_run(suite: &str, run: &Run, existing: &[Run]) -> Result<(), CoreError> {
    validate_shape(suite, run)?;
    validate_order(suite, run, existing)
}

fn validate_shape(suite: &str, run: &Run) -> Result<(), CoreError> {
    if suite.trim().is_empty() {
        return Err(CoreError::InvalidRun("suite name is empty".into()));
    }
    if run.benches.is_empty() {
        return Err(CoreError::InvalidRun("run has no measurements".into()));
    }
    if let Some(i) = run.benches.iter().position(|b| b.name.trim().is_empty()) {
        return Err(CoreError::InvalidRun(format!("bench {i} has an empty name")));
    }
    Ok(())
}

/// The store never reorders, so a run may not predate the suite's latest.
fn validate_order(suite: &str, run: &Run, existing: &[Run]) -> Result<(), CoreError> {
    if let Some(last) = existing.last() {
        if run.date < last.date {
            return Err(CoreError::InvalidRun(format!(
                "run date {} is older than the latest run in '{suite}' ({})",
                run.date, last.date
            )));
        }
    }
    Ok(())
}

/// Checks the invariants a loaded snapshot must satisfy.
pub(crate) fn check_snapshot(snapshot: &Snapshot) -> Result<(), CoreError> {
    for (name, runs) in snapshot.entries.iter() {
        if name.trim().is_empty() {
            return Err(CoreError::corrupt("empty suite name"));
        }
        if let Some(w) = runs.windows(2).find(|w| w[1].date < w[0].date) {
            return Err(CoreError::corrupt(format!(
                "suite '{name}' is out of order: {} follows {}",
                w[1].date, w[0].date
            )));
        }
    }
    Ok(())
}
