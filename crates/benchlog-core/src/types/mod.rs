mod commit;
mod measurement;
mod run;
mod snapshot;
mod tool;

pub use commit::{Commit, Identity};
pub use measurement::{Extra, Measurement};
pub use run::{Run, RunBuilder};
pub use snapshot::{Snapshot, Suites};
pub use tool::Tool;
