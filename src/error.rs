//! Error handling for the sort engine

use std::io;
use thiserror::Error;

/// Custom error type for sort operations
#[derive(Error, Debug)]
pub enum SortError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot open '{file}': {reason}")]
    CannotOpen { file: String, reason: String },

    #[error("error reading input: {reason}")]
    ReadFailed { reason: String },

    #[error("cannot write temporary run: {reason}")]
    RunWriteFailed { reason: String },

    #[error("{source_name}:{line}: disorder: {text}")]
    Disorder {
        source_name: String,
        line: usize,
        text: String,
    },

    #[error("conflicting sort options: {message}")]
    ConflictingOptions { message: String },

    #[error("invalid key column: {value}")]
    InvalidKeyColumn { value: String },
}

impl SortError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SortError::Io(_)
            | SortError::CannotOpen { .. }
            | SortError::ReadFailed { .. }
            | SortError::RunWriteFailed { .. } => crate::SORT_FAILURE,

            SortError::Disorder { .. } => crate::EXIT_FAILURE,

            _ => crate::EXIT_FAILURE,
        }
    }

    /// Create a cannot-open error for an input file
    pub fn cannot_open(file: &str, err: &io::Error) -> Self {
        SortError::CannotOpen {
            file: file.to_string(),
            reason: err.to_string(),
        }
    }

    /// Create a read failure error
    pub fn read_failed(err: &io::Error) -> Self {
        SortError::ReadFailed {
            reason: err.to_string(),
        }
    }

    /// Create a run-write failure error
    pub fn run_write_failed(err: &io::Error) -> Self {
        SortError::RunWriteFailed {
            reason: err.to_string(),
        }
    }

    /// Create a disorder error for check mode
    pub fn disorder(source_name: &str, line: usize, text: &str) -> Self {
        SortError::Disorder {
            source_name: source_name.to_string(),
            line,
            text: text.to_string(),
        }
    }

    /// Create a conflicting options error
    pub fn conflicting_options(message: &str) -> Self {
        SortError::ConflictingOptions {
            message: message.to_string(),
        }
    }

    /// Create an invalid key column error
    pub fn invalid_key_column(value: &str) -> Self {
        SortError::InvalidKeyColumn {
            value: value.to_string(),
        }
    }
}

/// Result type for sort operations
pub type SortResult<T> = Result<T, SortError>;
