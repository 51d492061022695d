use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::Run;

/// The whole persisted benchmark history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Snapshot {
    /// Date of the most recently appended run, in milliseconds since epoch.
    pub last_update: u64,
    pub repo_url: String,
    pub entries: Suites,
}

impl Snapshot {
    pub fn empty(repo_url: impl Into<String>) -> Self {
        Self {
            last_update: 0,
            repo_url: repo_url.into(),
            entries: Suites::default(),
        }
    }

    pub fn suite(&self, name: &str) -> Option<&[Run]> {
        self.entries.get(name)
    }

    pub fn run_count(&self) -> usize {
        self.entries.iter().map(|(_, runs)| runs.len()).sum()
    }
}

/// Suite name to runs, kept in insertion order.
///
/// Suites are few, so lookups are linear scans over a `Vec`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suites(Vec<(String, Vec<Run>)>);

impl Suites {
    pub fn get(&self, name: &str) -> Option<&[Run]> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, runs)| runs.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Run])> {
        self.0.iter().map(|(n, runs)| (n.as_str(), runs.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Push `run` onto the end of `suite`, creating it if needed. Returns the
    /// run's index within the suite.
    pub(crate) fn push(&mut self, suite: &str, run: Run) -> usize {
        if let Some((_, runs)) = self.0.iter_mut().find(|(n, _)| n == suite) {
            runs.push(run);
            return runs.len() - 1;
        }
        self.0.push((suite.to_string(), vec![run]));
        0
    }
}

impl Serialize for Suites {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, runs) in &self.0 {
            map.serialize_entry(name, runs)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Suites {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SuitesVisitor)
    }
}

struct SuitesVisitor;

impl<'de> Visitor<'de> for SuitesVisitor {
    type Value = Suites;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of suite names to runs")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Suites, A::Error> {
        let mut suites: Vec<(String, Vec<Run>)> =
            Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, runs)) = access.next_entry::<String, Vec<Run>>()? {
            if suites.iter().any(|(n, _)| *n == name) {
                return Err(serde::de::Error::custom(format!(
                    "duplicate suite '{name}'"
                )));
            }
            suites.push((name, runs));
        }
        Ok(Suites(suites))
    }
}
