pub mod cli;
pub mod report;

pub use cli::Cli;
pub use report::{
    DEFAULT_LIMIT, Format, NO_PHRASES_MESSAGE, NO_SOURCES_MESSAGE, RankedPhrase, Report,
    ReportConfig, rank, write_report,
};
