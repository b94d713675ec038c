//! An immutable view of the environment taken once at start-up.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::env_file;
use crate::error::EnvCheckResult;

/// Environment variables visible to a check.
///
/// Built from the process environment, optionally overlaid with the values
/// of an env file for names the process does not define. The process wins,
/// as with any dotenv loader.
///
/// # Examples
///
/// ```rust
/// use envcheck::EnvSnapshot;
///
/// let snapshot = EnvSnapshot::from_iter([("PORT", "8080"), ("EMPTY", "")]);
/// assert!(snapshot.is_set("PORT"));
/// assert!(!snapshot.is_set("EMPTY"));
/// assert!(!snapshot.is_set("HOST"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Captures the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Captures the process environment and overlays the env file at
    /// `env_file`, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the env file exists but cannot be read. Lines
    /// that do not parse are skipped.
    pub fn capture(env_file: impl AsRef<Path>) -> EnvCheckResult<Self> {
        let mut snapshot = Self::from_process();
        let entries = env_file::read_entries(env_file.as_ref())?;
        debug!(
            path = %env_file.as_ref().display(),
            count = entries.len(),
            "seeding snapshot from env file"
        );
        snapshot.overlay(entries);
        Ok(snapshot)
    }

    /// Adds `entries` for names not already present.
    pub fn overlay<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in entries {
            self.vars.entry(k.into()).or_insert_with(|| v.into());
        }
    }

    /// Returns the value of `name`, if defined.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Returns `true` if `name` is defined with a non-empty value.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_does_not_override() {
        let mut snapshot = EnvSnapshot::from_iter([("A", "shell")]);
        snapshot.overlay([("A", "file"), ("B", "file")]);
        assert_eq!(snapshot.get("A"), Some("shell"));
        assert_eq!(snapshot.get("B"), Some("file"));
    }

    #[test]
    fn capture_reads_env_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(".env");
        std::fs::write(&path, "ENVCHECK_SNAPSHOT_ONLY_IN_FILE=yes\n").unwrap();
        let snapshot = EnvSnapshot::capture(&path).unwrap();
        assert_eq!(snapshot.get("ENVCHECK_SNAPSHOT_ONLY_IN_FILE"), Some("yes"));
    }
}
