//! CLI-level errors (wraps library errors)

use thiserror::Error;

use crate::config::ConfigLoadError;
use crate::errors::XmlError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Xml(#[from] XmlError),

    #[error("{0}")]
    Config(#[from] ConfigLoadError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::Xml(e) => match e {
                XmlError::Io { .. } => crate::exitcode::NOINPUT,
                XmlError::Parse(_) | XmlError::Encoding(_) => crate::exitcode::DATAERR,
                XmlError::NullReference(_)
                | XmlError::OutOfRange { .. }
                | XmlError::TypeMismatch { .. }
                | XmlError::KeyNotFound(_) => crate::exitcode::SOFTWARE,
            },
        }
    }

    /// Parse failures are reported on stdout; everything else is a fault.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, CliError::Xml(XmlError::Parse(_)))
    }
}
