use clap::{Parser, Subcommand};
use formatter::code_owners;
use scanning::{parse_dir, parse_protect, ScanConfig, ScanError};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("loading config: {0}")]
    Config(#[source] ScanError),

    #[error("scanning directory: {0}")]
    Scan(#[source] ScanError),

    #[error("--protect: {0}")]
    Protect(#[source] ScanError),

    #[error("usage: {0}")]
    Usage(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Parser, Debug)]
#[command(name = "codeowner")]
#[command(about = "Print the CODEOWNERS file for a repository")]
#[command(
    long_about = "A CLI tool that scans source files for CodeOwner annotations and prints a CODEOWNERS file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Annotation prefix to search for [default: CodeOwner:]
    #[arg(long)]
    pub prefix: Option<String>,

    /// Filename for directory-level ownership [default: .codeowner]
    #[arg(long = "dirowner")]
    pub dir_owner: Option<String>,

    /// Owners for the CODEOWNERS file itself (e.g. "@admin @team")
    #[arg(long)]
    pub protect: Option<String>,

    /// TOML file with scan settings; flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the version information
    Version,
}

impl Cli {
    fn has_scan_args(&self) -> bool {
        self.path != Path::new(".")
            || self.prefix.is_some()
            || self.dir_owner.is_some()
            || self.protect.is_some()
            || self.config.is_some()
    }

    /// Scan settings from the config file (if any) with flag overrides applied.
    pub fn scan_config(&self) -> CliResult<ScanConfig> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::from_toml_file(path).map_err(CliError::Config)?,
            None => ScanConfig::default(),
        };
        if let Some(prefix) = &self.prefix {
            config = config.with_prefix(prefix.clone());
        }
        if let Some(dir_owner) = &self.dir_owner {
            config = config.with_dir_owner_file(dir_owner.clone());
        }
        config.checked().map_err(CliError::Config)
    }
}

pub fn version_line() -> String {
    format!(
        "codeowner {} (commit: {}, built at: {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("CODEOWNER_COMMIT").unwrap_or("none"),
        option_env!("CODEOWNER_BUILD_DATE").unwrap_or("unknown"),
    )
}

/// Writes the single user-facing line for a failed run. The error is only
/// logged at `debug`, so the default log filter does not repeat it.
pub fn report_error(error: &CliError, err: &mut impl Write) -> io::Result<()> {
    debug!(?error, "codeowner failed");
    writeln!(err, "Error: {}", error)
}

/// Executes a parsed command line. The CODEOWNERS document goes to `out`;
/// the notice for an empty result goes to `err`.
pub fn run(cli: &Cli, out: &mut impl Write, err: &mut impl Write) -> CliResult<()> {
    if let Some(Commands::Version) = cli.command {
        if cli.has_scan_args() {
            return Err(CliError::Usage(
                "the version subcommand does not take a path or scan options".to_string(),
            ));
        }
        writeln!(out, "{}", version_line())?;
        return Ok(());
    }

    let config = cli.scan_config()?;
    debug!(?config, path = %cli.path.display(), "starting scan");

    let mut mappings = parse_dir(&cli.path, &config).map_err(CliError::Scan)?;

    if let Some(protect) = cli.protect.as_deref().filter(|p| !p.is_empty()) {
        mappings.push(parse_protect(protect).map_err(CliError::Protect)?);
    }

    if mappings.is_empty() {
        writeln!(err, "no CodeOwner annotations found")?;
        return Ok(());
    }

    info!(entries = mappings.len(), "writing CODEOWNERS");
    out.write_all(code_owners(&mappings).as_bytes())?;
    out.flush()?;
    Ok(())
}
