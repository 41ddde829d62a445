use clap::Parser;
use codeowner::{report_error, run, Cli};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli, &mut io::stdout().lock(), &mut io::stderr()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = report_error(&e, &mut io::stderr());
            ExitCode::FAILURE
        }
    }
}
