pub mod append;
pub mod export;
pub mod init;
pub mod results;
pub mod show;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Create a benchmark store
    Init(init::InitArgs),
    /// Append a run to a suite
    Append(append::AppendArgs),
    /// Summarize the stored history
    Show(show::ShowArgs),
    /// Print the data file as served to the chart page
    Export(export::ExportArgs),
    /// Work with runner result files
    Results(results::ResultsArgs),
}

impl Commands {
    pub fn run(self) -> anyhow::Result<()> {
        match self {
            Commands::Init(args) => init::run(args),
            Commands::Append(args) => append::run(args),
            Commands::Show(args) => show::run(args),
            Commands::Export(args) => export::run(args),
            Commands::Results(args) => results::run(args),
        }
    }
}
