//! CLI support for the kash binary.
//!
//! The binary delegates to these functions so parsing and command execution
//! can be exercised in tests without spawning a process.

mod error;

use std::ffi::OsString;
use std::fmt;

use mockable::Env;
use tracing::debug;

use crate::config::KubeloginSettings;
use crate::fingerprint::{Fingerprint, fingerprint};

pub use error::CliError;

/// Commands understood by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fingerprint the kubelogin token cache key described by `OIDC_*`
    /// variables.
    Kubelogin,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kubelogin => f.write_str("kubelogin"),
        }
    }
}

/// Parses CLI arguments (without the program name) into a command.
///
/// Only the first argument is inspected; anything after it is ignored.
/// Arguments need not be valid Unicode.
///
/// # Errors
///
/// Returns [`CliError::MissingCommand`] when no argument is given and
/// [`CliError::UnknownCommand`] for anything other than `kubelogin`. The
/// reported command is lossily converted to UTF-8.
///
/// # Example
///
/// ```
/// use std::ffi::OsString;
///
/// use kash::cli::{CliError, Command, parse_args};
///
/// let args = vec![OsString::from("kubelogin")];
/// assert_eq!(parse_args(args.into_iter()), Ok(Command::Kubelogin));
///
/// let err = parse_args(std::iter::empty()).expect_err("missing command");
/// assert_eq!(err, CliError::MissingCommand);
/// ```
pub fn parse_args<I>(mut args: I) -> Result<Command, CliError>
where
    I: Iterator<Item = OsString>,
{
    let command = args.next().ok_or(CliError::MissingCommand)?;
    if command == "kubelogin" {
        Ok(Command::Kubelogin)
    } else {
        Err(CliError::UnknownCommand {
            command: command.to_string_lossy().into_owned(),
        })
    }
}

/// Runs `command` against the given environment.
///
/// # Errors
///
/// Returns [`CliError::Encoding`] if the cache key cannot be encoded.
///
/// # Example
///
/// ```
/// use std::env::VarError;
///
/// use kash::cli::{Command, run_command};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_raw().returning(|_| Err(VarError::NotPresent));
///
/// let digest = run_command(Command::Kubelogin, &env).expect("fingerprint");
/// assert_eq!(digest.to_hex().len(), 64);
/// ```
pub fn run_command<E: Env>(command: Command, env: &E) -> Result<Fingerprint, CliError> {
    debug!(%command, "running command");
    match command {
        Command::Kubelogin => {
            let settings = KubeloginSettings::from_env(env);
            Ok(fingerprint(&settings.cache_key())?)
        }
    }
}

/// Parses `args` and runs the selected command.
///
/// # Errors
///
/// Returns [`CliError`] when parsing or the command fails.
pub fn run<I, E>(args: I, env: &E) -> Result<Fingerprint, CliError>
where
    I: Iterator<Item = OsString>,
    E: Env,
{
    let command = parse_args(args)?;
    run_command(command, env)
}
