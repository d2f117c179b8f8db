use thiserror::Error;

/// Broad failure category of a rejected command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The argument list does not fit the flag grammar.
    Tokenize,
    /// A value is malformed or out of range.
    Range,
    /// A field the active mode needs is absent.
    Schema,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    #[error("Unknown flag: {0}.")]
    UnknownFlag(String),

    #[error("Missing value for {0}.")]
    MissingValue(String),

    #[error("Malformed command line: {0}")]
    Tokenize(String),

    #[error("Invalid value '{value}' for {flag}: expected an unsigned integer.")]
    InvalidNumber { flag: &'static str, value: String },

    #[error("{flag} must be greater than zero.")]
    NotPositive { flag: &'static str },

    #[error("Unknown mode '{0}', expected one of: default, frames, bench.")]
    InvalidMode(String),

    #[error("Invalid path for {flag}: {reason}.")]
    InvalidPath {
        flag: &'static str,
        reason: &'static str,
    },

    #[error("Invalid bench name '{0}': must be non-empty and free of path separators.")]
    InvalidBenchName(String),

    #[error("Invalid camera: {0}.")]
    InvalidCamera(String),

    #[error("{flag} is required in {mode} mode.")]
    MissingRequired {
        flag: &'static str,
        mode: &'static str,
    },
}

impl CliError {
    pub fn class(&self) -> ErrorClass {
        match self {
            CliError::UnknownFlag(_) | CliError::MissingValue(_) | CliError::Tokenize(_) => {
                ErrorClass::Tokenize
            }
            CliError::MissingRequired { .. } => ErrorClass::Schema,
            _ => ErrorClass::Range,
        }
    }
}
