//! CLI error handling.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use longecho_common_config::ConfigError;
use longecho_core::{ArchiveError, ManifestError, NonComplianceReason};
use longecho_site::SiteError;
use thiserror::Error;

use crate::Exit;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("{message}")]
    Validation { message: String, errors: Vec<String> },

    #[error("not ECHO-compliant: {} ({reason})", path.display())]
    NotCompliant {
        path: PathBuf,
        reason: NonComplianceReason,
    },

    #[error("{message}")]
    NotFound { message: String, path: PathBuf },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "E001",
            Self::Io { .. } => "E002",
            Self::Validation { .. } => "E004",
            Self::NotFound { .. } => "E005",
            Self::NotCompliant { .. } => "E010",
            Self::Other(_) => "E999",
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        let exit = match self {
            Self::Config(_) => Exit::ConfigError,
            Self::Io { .. } => Exit::IoError,
            Self::Validation { .. } => Exit::ValidationError,
            Self::NotFound { .. } => Exit::NotFound,
            Self::NotCompliant { .. } | Self::Other(_) => Exit::GeneralError,
        };
        exit.into()
    }
}

impl From<ManifestError> for CliError {
    fn from(error: ManifestError) -> Self {
        match error {
            ManifestError::Invalid { path, errors } => Self::Validation {
                message: format!("invalid manifest at {}", path.display()),
                errors,
            },
            other => Self::Other(other.into()),
        }
    }
}

impl From<ArchiveError> for CliError {
    fn from(error: ArchiveError) -> Self {
        match error {
            ArchiveError::NotCompliant { path, reason } => Self::NotCompliant { path, reason },
            ArchiveError::Manifest(e) => e.into(),
        }
    }
}

impl From<SiteError> for CliError {
    fn from(error: SiteError) -> Self {
        match error {
            SiteError::Archive(e) => e.into(),
            SiteError::Copy { path, source } => Self::Io {
                message: format!("failed to copy {}", path.display()),
                source,
            },
            other => Self::Other(other.into()),
        }
    }
}
