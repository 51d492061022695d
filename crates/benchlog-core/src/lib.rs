pub mod codec;
pub mod error;
pub mod history;
pub mod results;
pub mod types;

pub use codec::{decode, encode};
pub use error::CoreError;
pub use history::{AppendOutcome, DuplicatePolicy};
pub use types::{Commit, Extra, Identity, Measurement, Run, RunBuilder, Snapshot, Suites, Tool};
