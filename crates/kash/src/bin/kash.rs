//! Token cache key fingerprint CLI.
//!
//! Prints the fingerprint of the cache key selected by the command, with no
//! trailing newline. Parsing and execution live in `kash::cli`.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use kash::Fingerprint;
use kash::cli::{CliError, run};
use mockable::DefaultEnv;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    init_tracing();
    match run_cli() {
        Ok(digest) => write_digest(&digest),
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> Result<Fingerprint, CliError> {
    run(env::args_os().skip(1), &DefaultEnv::new())
}

/// Logs go to stderr so stdout carries only the digest.
fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

fn write_digest(digest: &Fingerprint) -> ExitCode {
    let mut stdout = io::stdout().lock();
    match stdout
        .write_all(digest.to_hex().as_bytes())
        .and_then(|()| stdout.flush())
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "failed to write digest: {err}")
            {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}
