//! Error types for envcheck operations.

use std::path::Path;

use thiserror::Error;

/// A specialized `Result` type for envcheck operations.
pub type EnvCheckResult<T> = Result<T, EnvCheckError>;

/// Errors that can occur while managing tracked environment variables.
///
/// Every variant is terminal for the current invocation; the binary reports
/// it on stderr and exits with a non-zero status.
#[derive(Debug, Error)]
pub enum EnvCheckError {
    /// The manifest file does not exist.
    #[error("{path} not found")]
    ManifestNotFound {
        /// The path that was looked up.
        path: String,
    },

    /// The manifest is not valid JSON, its root is not an object, or its
    /// `envCheck` field cannot be merged into.
    #[error("failed to parse {path}: {reason}")]
    ManifestParseError {
        /// The path to the manifest.
        path: String,
        /// The reason for the failure.
        reason: String,
    },

    /// The manifest has no `envCheck` field, or it is not a list of strings.
    #[error("No \"envCheck\" configuration found in {path}.")]
    NoEnvCheckConfigured {
        /// The path to the manifest.
        path: String,
    },

    /// The environment file does not exist.
    #[error("{path} file not found.")]
    EnvFileNotFound {
        /// The path that was looked up.
        path: String,
    },

    /// `--add` was given without any variable names.
    #[error("No variables provided to add.")]
    NoVariablesProvided,

    /// The first command-line argument is not a known command.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// The operator interrupted an interactive prompt.
    #[error("prompt interrupted while reading {name}")]
    PromptInterrupted {
        /// The variable that was being prompted for.
        name: String,
    },

    /// The line editor failed for a reason other than an interrupt.
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file being accessed.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl EnvCheckError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Process exit status the binary uses for this error.
    ///
    /// Interrupts follow the shell convention of `128 + SIGINT`.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::PromptInterrupted { .. } => 130,
            _ => 1,
        }
    }
}
