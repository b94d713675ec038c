//! Resolution of the manifest and environment file locations.

use std::path::{
    Path,
    PathBuf,
};

/// Default manifest file name, relative to the project directory.
pub const DEFAULT_MANIFEST: &str = "package.json";

/// Default environment file name, relative to the project directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Locations of the two files envcheck reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// The JSON manifest carrying the `envCheck` list.
    pub manifest: PathBuf,
    /// The `NAME=VALUE` environment file.
    pub env_file: PathBuf,
}

impl ProjectPaths {
    /// Uses the default file names inside `dir`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use envcheck::ProjectPaths;
    ///
    /// let paths = ProjectPaths::in_dir("/srv/app");
    /// assert!(paths.manifest.ends_with("package.json"));
    /// assert!(paths.env_file.ends_with(".env"));
    /// ```
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::resolve(dir, None, None)
    }

    /// Resolves explicit overrides against `dir`.
    ///
    /// Absolute overrides are used as-is; relative ones are joined onto
    /// `dir`. Missing overrides fall back to [`DEFAULT_MANIFEST`] and
    /// [`DEFAULT_ENV_FILE`].
    pub fn resolve(
        dir: impl AsRef<Path>,
        manifest: Option<&Path>,
        env_file: Option<&Path>,
    ) -> Self {
        let dir = dir.as_ref();
        Self {
            manifest: dir.join(manifest.unwrap_or(Path::new(DEFAULT_MANIFEST))),
            env_file: dir.join(env_file.unwrap_or(Path::new(DEFAULT_ENV_FILE))),
        }
    }
}

/// Short name of a path for operator-facing messages.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_join_onto_dir() {
        let paths = ProjectPaths::in_dir("/tmp/project");
        assert_eq!(paths.manifest, PathBuf::from("/tmp/project/package.json"));
        assert_eq!(paths.env_file, PathBuf::from("/tmp/project/.env"));
    }

    #[test]
    fn absolute_override_wins() {
        let paths = ProjectPaths::resolve(
            "/tmp/project",
            Some(Path::new("/etc/app/manifest.json")),
            Some(Path::new("config/.env.local")),
        );
        assert_eq!(paths.manifest, PathBuf::from("/etc/app/manifest.json"));
        assert_eq!(
            paths.env_file,
            PathBuf::from("/tmp/project/config/.env.local")
        );
    }

    #[test]
    fn display_name_uses_file_name() {
        assert_eq!(display_name(Path::new("/a/b/package.json")), "package.json");
        assert_eq!(display_name(Path::new(".env")), ".env");
    }
}
