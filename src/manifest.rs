//! The project manifest and its `envCheck` list.
//!
//! The manifest is a JSON object (usually `package.json`). Only the
//! `envCheck` field is interpreted; every other field is carried through
//! unchanged, in its original order, when the document is saved.

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::{
    Map,
    Value,
};
use tracing::{
    debug,
    info,
};

use crate::config::display_name;
use crate::error::{
    EnvCheckError,
    EnvCheckResult,
};

/// Name of the manifest field holding the tracked variable names.
pub const ENV_CHECK_FIELD: &str = "envCheck";

/// A loaded manifest document.
///
/// # Examples
///
/// ```rust,no_run
/// use envcheck::Manifest;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut manifest = Manifest::load("package.json")?;
/// manifest.add_variables(["DATABASE_URL", "PORT"])?;
/// manifest.save()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    document: Map<String, Value>,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvCheckError::ManifestNotFound`] if the file does not exist
    /// and [`EnvCheckError::ManifestParseError`] if it is not a JSON object.
    pub fn load(path: impl AsRef<Path>) -> EnvCheckResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EnvCheckError::ManifestNotFound {
                    path: path.display().to_string(),
                }
            } else {
                EnvCheckError::io(path, e)
            }
        })?;
        debug!(path = %path.display(), "loaded manifest");
        Self::parse(&content, path)
    }

    /// Parses manifest content that was read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvCheckError::ManifestParseError`] if the content is not a
    /// JSON object.
    pub fn parse(content: &str, path: impl AsRef<Path>) -> EnvCheckResult<Self> {
        let path = path.as_ref();
        let parse_error = |reason: String| EnvCheckError::ManifestParseError {
            path: path.display().to_string(),
            reason,
        };
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(document)) => Ok(Self {
                path: path.to_path_buf(),
                document,
            }),
            Ok(_) => Err(parse_error("root is not a JSON object".to_string())),
            Err(e) => Err(parse_error(e.to_string())),
        }
    }

    /// Path the manifest was loaded from and will be saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full document, `envCheck` included.
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    /// Returns the tracked variable names in manifest order.
    ///
    /// # Errors
    ///
    /// Returns [`EnvCheckError::NoEnvCheckConfigured`] if `envCheck` is
    /// absent or is not a list of strings.
    pub fn tracked_variables(&self) -> EnvCheckResult<Vec<String>> {
        self.document
            .get(ENV_CHECK_FIELD)
            .and_then(|v| serde_json::from_value::<Vec<String>>(v.clone()).ok())
            .ok_or_else(|| EnvCheckError::NoEnvCheckConfigured {
                path: display_name(&self.path),
            })
    }

    /// Merges `names` into `envCheck`, preserving order and skipping names
    /// that are already tracked.
    ///
    /// The field is created when absent or `null`. Returns the names that
    /// were actually inserted. The document is only changed in memory; call
    /// [`save`](Self::save) to persist it.
    ///
    /// # Errors
    ///
    /// Returns [`EnvCheckError::ManifestParseError`] if `envCheck` exists
    /// but is not a list of strings.
    pub fn add_variables<I, S>(&mut self, names: I) -> EnvCheckResult<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tracked = match self.document.get(ENV_CHECK_FIELD) {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => serde_json::from_value::<Vec<String>>(value.clone()).map_err(|_| {
                EnvCheckError::ManifestParseError {
                    path: self.path.display().to_string(),
                    reason: format!("\"{}\" must be an array of strings", ENV_CHECK_FIELD),
                }
            })?,
        };

        let mut inserted = Vec::new();
        for name in names {
            let name = name.as_ref();
            if !tracked.iter().any(|t| t == name) {
                tracked.push(name.to_string());
                inserted.push(name.to_string());
            }
        }

        // `insert` keeps the position of an existing key with preserve_order.
        self.document.insert(
            ENV_CHECK_FIELD.to_string(),
            Value::Array(tracked.into_iter().map(Value::String).collect()),
        );
        Ok(inserted)
    }

    /// Renders the document with 2-space indentation and a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`EnvCheckError::ManifestParseError`] if serialization fails.
    pub fn to_pretty_string(&self) -> EnvCheckResult<String> {
        let mut rendered = serde_json::to_string_pretty(&self.document).map_err(|e| {
            EnvCheckError::ManifestParseError {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        rendered.push('\n');
        Ok(rendered)
    }

    /// Writes the document back to [`path`](Self::path), replacing the file
    /// atomically.
    ///
    /// A symlinked manifest is written through to its target, and the
    /// replaced file's permissions are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or renamed
    /// over the manifest.
    pub fn save(&self) -> EnvCheckResult<()> {
        let rendered = self.to_pretty_string()?;
        let target = std::fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let io_error = |e: std::io::Error| EnvCheckError::io(&self.path, e);

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
        temp.write_all(rendered.as_bytes()).map_err(io_error)?;
        if let Ok(metadata) = std::fs::metadata(&target) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(io_error)?;
        }
        temp.persist(&target).map_err(|e| io_error(e.error))?;
        debug!(path = %target.display(), "saved manifest");
        Ok(())
    }
}

/// Adds `names` to the manifest at `path` and saves it.
///
/// Prints a confirmation listing the names as supplied, whether or not they
/// were already tracked. Returns the names that were newly inserted.
///
/// # Errors
///
/// Returns any error from [`Manifest::load`], [`Manifest::add_variables`] or
/// [`Manifest::save`]. The manifest is not touched when an error occurs
/// before saving.
pub fn add_variables(path: impl AsRef<Path>, names: &[String]) -> EnvCheckResult<Vec<String>> {
    let mut manifest = Manifest::load(path)?;
    let inserted = manifest.add_variables(names)?;
    manifest.save()?;
    info!(
        supplied = names.len(),
        inserted = inserted.len(),
        "updated {} list",
        ENV_CHECK_FIELD
    );
    println!(
        "Added variables: {} to the {} field in {}",
        names.join(", "),
        ENV_CHECK_FIELD,
        display_name(manifest.path())
    );
    Ok(inserted)
}
