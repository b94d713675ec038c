#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::missing_panics_doc)]
#![doc = include_str!("../README.md")]

pub mod checker;
pub mod commands;
pub mod config;
pub mod env_file;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod prompt;
pub mod snapshot;

pub use crate::checker::{
    CheckOutcome,
    check,
    missing_variables,
};
pub use crate::config::ProjectPaths;
pub use crate::error::{
    EnvCheckError,
    EnvCheckResult,
};
pub use crate::manifest::Manifest;
pub use crate::prompt::{
    Answers,
    LinePrompter,
    Prompter,
    TerminalPrompter,
};
pub use crate::snapshot::EnvSnapshot;
