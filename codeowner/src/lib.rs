pub mod cli;

pub use cli::{report_error, run, version_line, Cli, CliError, CliResult, Commands};
