//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for dispatch operations
///
/// Usage errors all map to exit code 1; a handler failure carries the
/// handler-chosen code. The dispatcher writes usage text or a `FATAL:`
/// diagnostic to the error sink before returning one of these, so the
/// topmost caller only has to map `exit_code()` to `process::exit`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DispatchError {
    /// No subcommand was given on the command line
    #[error("no subcommand specified")]
    NoSubcommand,

    /// The first positional token did not match any registered subcommand
    #[error("unknown subcommand '{name}'")]
    UnknownSubcommand { name: String },

    /// The flag adapter rejected the subcommand's arguments
    #[error("invalid arguments for '{command}': {message}")]
    InvalidArguments { command: String, message: String },

    /// One or more required flags were not explicitly supplied
    #[error("subcommand '{}' is missing required flags: {}", .command, .missing.join(", "))]
    MissingFlags {
        command: String,
        missing: Vec<String>,
    },

    /// The subcommand handler reported a failure
    #[error("{message}")]
    Handler { code: i32, message: String },
}

impl DispatchError {
    /// Get the appropriate exit code for this error
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::NoSubcommand
            | Self::UnknownSubcommand { .. }
            | Self::InvalidArguments { .. }
            | Self::MissingFlags { .. } => 1,
            Self::Handler { code, .. } => code,
        }
    }

    /// Create an invalid-arguments error
    #[inline]
    pub fn invalid_arguments<C: Into<String>, M: Into<String>>(command: C, message: M) -> Self {
        Self::InvalidArguments {
            command: command.into(),
            message: message.into(),
        }
    }
}

/// Failure reported by a subcommand handler
///
/// Handlers return `anyhow::Result<()>`; returning a `Failure` lets the
/// handler pick the process exit code and request that usage be shown after
/// the diagnostic. Any other error type exits with code -1 and no usage.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Failure {
    pub code: i32,
    pub message: String,
    pub help: bool,
}

impl Failure {
    /// Create a failure with an exit code and message
    #[inline]
    pub fn new<S: Into<String>>(code: i32, message: S) -> Self {
        Self {
            code,
            message: message.into(),
            help: false,
        }
    }

    /// Request that the subcommand usage be printed after the diagnostic
    #[must_use]
    #[inline]
    pub fn with_help(mut self) -> Self {
        self.help = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_errors_exit_with_one() {
        assert_eq!(DispatchError::NoSubcommand.exit_code(), 1);
        assert_eq!(
            DispatchError::UnknownSubcommand {
                name: "bogus".to_owned()
            }
            .exit_code(),
            1
        );
        assert_eq!(
            DispatchError::MissingFlags {
                command: "pull".to_owned(),
                missing: vec!["tag".to_owned()],
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_handler_error_keeps_its_code() {
        let err = DispatchError::Handler {
            code: 3,
            message: "bad input".to_owned(),
        };
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string(), "bad input");
    }

    #[test]
    fn test_missing_flags_message_joins_names() {
        let err = DispatchError::MissingFlags {
            command: "pull".to_owned(),
            missing: vec!["source".to_owned(), "target".to_owned()],
        };
        assert!(err.to_string().contains("source, target"));
    }

    #[test]
    fn test_failure_builder() {
        let failure = Failure::new(3, "bad input").with_help();
        assert_eq!(failure.code, 3);
        assert!(failure.help);
        assert_eq!(failure.to_string(), "bad input");
    }
}
