use serde::{Deserialize, Serialize};
use std::fmt;

/// Benchmark tool a run was produced with. Determines whether larger values
/// are improvements.
///
/// Unknown tool names are kept verbatim so they survive a load/export cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tool {
    CustomBiggerIsBetter,
    CustomSmallerIsBetter,
    Cargo,
    Go,
    BenchmarkJs,
    Pytest,
    GoogleCpp,
    Catch2,
    Julia,
    Jmh,
    BenchmarkDotNet,
    Other(String),
}

impl Tool {
    pub fn as_str(&self) -> &str {
        match self {
            Self::CustomBiggerIsBetter => "customBiggerIsBetter",
            Self::CustomSmallerIsBetter => "customSmallerIsBetter",
            Self::Cargo => "cargo",
            Self::Go => "go",
            Self::BenchmarkJs => "benchmarkjs",
            Self::Pytest => "pytest",
            Self::GoogleCpp => "googlecpp",
            Self::Catch2 => "catch2",
            Self::Julia => "julia",
            Self::Jmh => "jmh",
            Self::BenchmarkDotNet => "benchmarkdotnet",
            Self::Other(name) => name,
        }
    }

    /// Whether a larger measurement value is an improvement.
    pub fn bigger_is_better(&self) -> bool {
        match self {
            Self::CustomBiggerIsBetter | Self::BenchmarkJs | Self::Pytest => true,
            Self::CustomSmallerIsBetter
            | Self::Cargo
            | Self::Go
            | Self::GoogleCpp
            | Self::Catch2
            | Self::Julia
            | Self::Jmh
            | Self::BenchmarkDotNet => false,
            Self::Other(name) => name.to_ascii_lowercase().contains("bigger"),
        }
    }
}

impl From<String> for Tool {
    fn from(s: String) -> Self {
        match s.as_str() {
            "customBiggerIsBetter" => Self::CustomBiggerIsBetter,
            "customSmallerIsBetter" => Self::CustomSmallerIsBetter,
            "cargo" => Self::Cargo,
            "go" => Self::Go,
            "benchmarkjs" => Self::BenchmarkJs,
            "pytest" => Self::Pytest,
            "googlecpp" => Self::GoogleCpp,
            "catch2" => Self::Catch2,
            "julia" => Self::Julia,
            "jmh" => Self::Jmh,
            "benchmarkdotnet" => Self::BenchmarkDotNet,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for Tool {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Tool> for String {
    fn from(tool: Tool) -> Self {
        match tool {
            Tool::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
