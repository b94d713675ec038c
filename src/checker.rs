//! The default operation: make sure every tracked variable is set.

use std::path::Path;

use tracing::info;

use crate::config::{
    ProjectPaths,
    display_name,
};
use crate::env_file;
use crate::error::EnvCheckResult;
use crate::manifest::Manifest;
use crate::prompt::Prompter;
use crate::snapshot::EnvSnapshot;

/// What a check ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Every tracked variable was already set; nothing was written.
    AllSet,
    /// These variables were missing and their answers were appended to the
    /// env file.
    Updated(Vec<String>),
}

/// Returns the tracked names that are absent or empty in `snapshot`, in
/// tracked order.
///
/// # Examples
///
/// ```rust
/// use envcheck::{EnvSnapshot, missing_variables};
///
/// let snapshot = EnvSnapshot::from_iter([("A", "1"), ("B", "")]);
/// let tracked = vec!["A".to_string(), "B".to_string(), "C".to_string()];
/// assert_eq!(missing_variables(&tracked, &snapshot), vec!["B", "C"]);
/// ```
pub fn missing_variables(tracked: &[String], snapshot: &EnvSnapshot) -> Vec<String> {
    tracked
        .iter()
        .filter(|name| !snapshot.is_set(name))
        .cloned()
        .collect()
}

/// Checks the tracked variables of the project at `paths`.
///
/// Missing variables are prompted for in manifest order and the answers are
/// appended to the env file as one block.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or has no `envCheck`
/// list (before any prompting), if a prompt is interrupted, or if the env
/// file cannot be written.
pub fn check(
    paths: &ProjectPaths,
    snapshot: &EnvSnapshot,
    prompter: &mut dyn Prompter,
) -> EnvCheckResult<CheckOutcome> {
    let manifest = Manifest::load(&paths.manifest)?;
    let tracked = manifest.tracked_variables()?;
    let missing = missing_variables(&tracked, snapshot);

    if missing.is_empty() {
        info!(tracked = tracked.len(), "all tracked variables set");
        println!("All environment variables are set.");
        return Ok(CheckOutcome::AllSet);
    }

    println!("Missing environment variables: {}", missing.join(", "));
    let answers = prompter.prompt_for_values(&missing)?;
    write_answers(&paths.env_file, &answers)?;
    info!(count = answers.len(), "recorded missing variables");
    println!("{} file updated successfully.", display_name(&paths.env_file));
    Ok(CheckOutcome::Updated(missing))
}

fn write_answers(env_file: &Path, answers: &[(String, String)]) -> EnvCheckResult<()> {
    env_file::append_entries(
        env_file,
        answers.iter().map(|(k, v)| (k.as_str(), v.as_str())),
    )
}
