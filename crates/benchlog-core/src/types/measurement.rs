use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::CoreError;

/// Free-form annotation on a measurement.
///
/// Producers emit either a plain string or a list of strings; whichever shape
/// was read is the shape written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extra {
    Text(String),
    List(Vec<String>),
}

impl Extra {
    /// Human readable form, joining list entries with `", "`.
    pub fn display(&self) -> String {
        match self {
            Extra::Text(s) => s.clone(),
            Extra::List(items) => items.join(", "),
        }
    }
}

/// A single named result within a run.
///
/// `value` keeps the numeric form it was read with, so an integer literal is
/// exported as an integer and a float in its shortest form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Measurement {
    pub name: String,
    pub value: Number,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Extra>,
}

impl Measurement {
    pub fn new(
        name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let name = name.into();
        let value = Number::from_f64(value).ok_or_else(|| {
            CoreError::InvalidRun(format!("measurement '{name}' has non-finite value {value}"))
        })?;
        Ok(Self {
            name,
            value,
            unit: unit.into(),
            extra: None,
        })
    }

    pub fn with_extra(mut self, extra: Extra) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn value_f64(&self) -> f64 {
        // Every JSON number has an f64 approximation.
        self.value.as_f64().unwrap_or_default()
    }
}
