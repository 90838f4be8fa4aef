//! Error types for the kash CLI.

use thiserror::Error;

use crate::error::EncodeError;

/// Errors surfaced by argument parsing and command execution.
///
/// Every variant ends the process with exit code 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// No command was supplied.
    #[error("usage: kash <command>")]
    MissingCommand,
    /// The command is not recognised.
    #[error("unknown command: {command}")]
    UnknownCommand {
        /// Command as typed.
        command: String,
    },
    /// The cache key could not be encoded.
    #[error("could not encode the key: {source}")]
    Encoding {
        /// Underlying encoder error.
        #[from]
        #[source]
        source: EncodeError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_command_prints_usage() {
        assert_eq!(CliError::MissingCommand.to_string(), "usage: kash <command>");
    }

    #[test]
    fn unknown_command_names_the_command() {
        let err = CliError::UnknownCommand {
            command: "foo".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown command: foo");
    }

    #[test]
    fn encoding_error_wraps_the_cause() {
        let err = CliError::from(EncodeError::TypeIdExhausted);
        assert_eq!(
            err.to_string(),
            "could not encode the key: gob type id space exhausted"
        );
    }
}
