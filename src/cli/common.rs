//! Shared CLI error and exit-code handling.

use std::fmt;

/// Result type for CLI command execution.
pub type CliResult<T> = Result<T, CliError>;

/// Category of a CLI failure, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Everything succeeded
    Success = 0,
    /// A check-style command found problems (broken profiles)
    CheckFailed = 1,
    /// Bad arguments or state the user can correct
    Validation = 2,
    /// File-system or serialization failure
    Io = 3,
}

/// A CLI-surface error with a user-facing message and exit code.
#[derive(Debug)]
pub struct CliError {
    code: ExitCode,
    message: String,
}

impl CliError {
    /// A validation failure (exit code 2).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// An I/O failure (exit code 3).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Io,
            message: message.into(),
        }
    }

    /// A failed check (exit code 1).
    pub fn check_failed(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::CheckFailed,
            message: message.into(),
        }
    }

    /// The process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.code as i32
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}
