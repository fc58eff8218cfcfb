use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - document written or report printed
    Success = 0,
    /// Application error (missing lockfile, unreadable document, bad selector, I/O error, etc.)
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Application-specific errors for SBOM generation and license reporting.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("No Gemfile.lock found: {path}\n\n💡 Hint: {suggestion}")]
    LockfileNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse lockfile: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the lockfile was produced by `bundle lock`")]
    LockfileParseError { path: PathBuf, details: String },

    #[error("Unsupported {kind} '{value}'. Supported formats: {supported}")]
    UnsupportedSelector {
        kind: String,
        value: String,
        supported: String,
    },

    #[error("SBOM file not found: {path}\n\n💡 Hint: {suggestion}")]
    DocumentNotFound { path: PathBuf, suggestion: String },

    #[error("Error processing {path}: {details}\n\n💡 Hint: Please verify that the file is a valid SPDX or CycloneDX document")]
    DocumentParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    /// Validation error for domain value objects
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl SbomError {
    /// Builds the error for an unrecognized `--format` value
    pub fn unsupported_output_format(value: &str) -> Self {
        SbomError::UnsupportedSelector {
            kind: "output format".to_string(),
            value: value.to_string(),
            supported: "json, xml".to_string(),
        }
    }

    /// Builds the error for an unrecognized `--sbom` value
    pub fn unsupported_sbom_format(value: &str) -> Self {
        SbomError::UnsupportedSelector {
            kind: "SBOM format".to_string(),
            value: value.to_string(),
            supported: "spdx, cyclonedx".to_string(),
        }
    }
}
