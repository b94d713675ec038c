//! The `--add` and `--sync` operations.

use tracing::debug;

use crate::config::{
    ProjectPaths,
    display_name,
};
use crate::env_file;
use crate::error::{
    EnvCheckError,
    EnvCheckResult,
};
use crate::manifest;

/// Tracks `names` in the project manifest.
///
/// Returns the names that were not tracked before.
///
/// # Errors
///
/// Returns [`EnvCheckError::NoVariablesProvided`] if `names` is empty, in
/// which case the manifest is not read or written, and any manifest load or
/// save error.
pub fn add(paths: &ProjectPaths, names: &[String]) -> EnvCheckResult<Vec<String>> {
    if names.is_empty() {
        return Err(EnvCheckError::NoVariablesProvided);
    }
    manifest::add_variables(&paths.manifest, names)
}

/// Tracks every name assigned in the env file.
///
/// Duplicates in the env file are passed through; the manifest merge drops
/// them. Returns the names that were not tracked before.
///
/// # Errors
///
/// Returns [`EnvCheckError::EnvFileNotFound`] if the env file does not
/// exist, and any manifest load or save error.
pub fn sync(paths: &ProjectPaths) -> EnvCheckResult<Vec<String>> {
    let names = env_file::read_names(&paths.env_file)?;
    debug!(count = names.len(), "names found in env file");
    let inserted = manifest::add_variables(&paths.manifest, &names)?;
    println!(
        "Synced variables from {} to {}.",
        display_name(&paths.env_file),
        display_name(&paths.manifest)
    );
    Ok(inserted)
}
