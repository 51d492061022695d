use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Commit, Measurement, Tool};
use crate::CoreError;

/// One benchmark execution: every measurement taken for a commit at a point
/// in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Run {
    pub commit: Commit,
    /// Milliseconds since the Unix epoch.
    pub date: u64,
    pub tool: Tool,
    pub benches: Vec<Measurement>,
}

impl Run {
    pub fn from_json(s: &str) -> Result<Self, CoreError> {
        let value: Value =
            serde_json::from_str(s).map_err(|e| CoreError::InvalidRun(e.to_string()))?;
        Self::from_value(value)
    }

    /// Parse a run supplied by a benchmark runner. A missing or non-numeric
    /// `date` and any non-numeric measurement value are reported as
    /// `InvalidRun`.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        let obj = value
            .as_object()
            .ok_or_else(|| CoreError::InvalidRun("run must be a JSON object".into()))?;
        match obj.get("date") {
            None | Some(Value::Null) => {
                return Err(CoreError::InvalidRun("run is missing `date`".into()))
            }
            Some(d) if d.as_u64().is_none() => {
                return Err(CoreError::InvalidRun(format!(
                    "`date` must be a non-negative integer, got {d}"
                )))
            }
            Some(_) => {}
        }
        if let Some(benches) = obj.get("benches").and_then(Value::as_array) {
            for (i, bench) in benches.iter().enumerate() {
                if !bench.get("value").is_some_and(Value::is_number) {
                    return Err(CoreError::InvalidRun(format!(
                        "bench {i}: `value` must be a number"
                    )));
                }
            }
        }
        serde_json::from_value(value).map_err(|e| CoreError::InvalidRun(e.to_string()))
    }

    /// Measurement by exact name.
    pub fn bench(&self, name: &str) -> Option<&Measurement> {
        self.benches.iter().find(|b| b.name == name)
    }
}

/// Assembles a [`Run`] from the pieces a CI job has at hand.
#[derive(Debug, Clone)]
pub struct RunBuilder {
    commit: Commit,
    tool: Tool,
    date: Option<u64>,
    benches: Vec<Measurement>,
}

impl RunBuilder {
    pub fn new(commit: Commit, tool: impl Into<Tool>) -> Self {
        Self {
            commit,
            tool: tool.into(),
            date: None,
            benches: Vec::new(),
        }
    }

    pub fn date(mut self, date_ms: u64) -> Self {
        self.date = Some(date_ms);
        self
    }

    pub fn bench(mut self, measurement: Measurement) -> Self {
        self.benches.push(measurement);
        self
    }

    pub fn benches(mut self, measurements: impl IntoIterator<Item = Measurement>) -> Self {
        self.benches.extend(measurements);
        self
    }

    pub fn build(self) -> Result<Run, CoreError> {
        let date = self
            .date
            .ok_or_else(|| CoreError::InvalidRun("run is missing `date`".into()))?;
        Ok(Run {
            commit: self.commit,
            date,
            tool: self.tool,
            benches: self.benches,
        })
    }
}
