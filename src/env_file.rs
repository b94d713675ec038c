//! Reading and appending to the `NAME=VALUE` environment file.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::{
    debug,
    warn,
};

use crate::error::{
    EnvCheckError,
    EnvCheckResult,
};

/// Comment line that opens every block appended by envcheck.
pub const AUTO_GEN_MARKER: &str = "#Auto GEN by envCheck";

/// Reads the variable names assigned in the env file at `path`.
///
/// Blank lines and lines starting with `#` are skipped; for every other line
/// the text before the first `=` is the name. Names are returned in file
/// order and duplicates are kept.
///
/// # Errors
///
/// Returns [`EnvCheckError::EnvFileNotFound`] if the file does not exist.
pub fn read_names(path: impl AsRef<Path>) -> EnvCheckResult<Vec<String>> {
    let path = path.as_ref();
    let content = read_existing(path)?;
    debug!(path = %path.display(), "read env file names");
    Ok(parse_names(&content))
}

/// Extracts variable names from env file content.
///
/// # Examples
///
/// ```rust
/// use envcheck::env_file::parse_names;
///
/// let names = parse_names("FOO=1\nBAR=2\n# comment\n\nBAZ=3");
/// assert_eq!(names, vec!["FOO", "BAR", "BAZ"]);
/// ```
pub fn parse_names(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let name = line.split_once('=').map_or(line, |(name, _)| name);
            name.trim().to_string()
        })
        .collect()
}

/// Parses the env file at `path` with dotenv rules into ordered entries.
///
/// Quotes, escapes and `export` prefixes are handled by `dotenvy`. Lines that
/// do not parse are skipped with a warning. A missing file yields no entries.
///
/// # Errors
///
/// Returns an I/O error if the file exists but cannot be read.
pub fn read_entries(path: impl AsRef<Path>) -> EnvCheckResult<Vec<(String, String)>> {
    let path = path.as_ref();
    let content = match read_existing(path) {
        Ok(content) => content,
        Err(EnvCheckError::EnvFileNotFound { .. }) => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };
    Ok(parse_entries(&content, path))
}

fn parse_entries(content: &str, path: &Path) -> Vec<(String, String)> {
    dotenvy::from_read_iter(content.as_bytes())
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unparseable env file line");
                None
            }
        })
        .collect()
}

/// Checks if a value must be double-quoted to be read back unchanged.
fn needs_quoting(value: &str) -> bool {
    value.contains(char::is_whitespace)
        || value.contains(['"', '\'', '\\', '$', '#'])
}

/// Escapes a string for use inside double quotes.
fn escape_for_double_quotes(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '$' => result.push_str("\\$"),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

/// Formats one assignment.
///
/// Values containing whitespace are double-quoted, as are values with quotes,
/// backslashes, `$` or `#`, which dotenv readers would otherwise interpret.
/// Inside the quotes `\`, `"`, `$` and newlines are backslash-escaped.
///
/// # Examples
///
/// ```rust
/// use envcheck::env_file::format_entry;
///
/// assert_eq!(format_entry("X", "1"), "X=1");
/// assert_eq!(format_entry("Y", "a b"), "Y=\"a b\"");
/// assert_eq!(format_entry("P", r"C:\x y"), r#"P="C:\\x y""#);
/// ```
pub fn format_entry(name: &str, value: &str) -> String {
    if needs_quoting(value) {
        format!("{}=\"{}\"", name, escape_for_double_quotes(value))
    } else {
        format!("{}={}", name, value)
    }
}

/// Renders the block appended for `entries`: a blank line, the
/// [`AUTO_GEN_MARKER`] comment, one assignment per entry, and a final newline.
pub fn render_block<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let lines: Vec<String> = entries
        .into_iter()
        .map(|(name, value)| format_entry(name, value))
        .collect();
    format!("\n{}\n{}\n", AUTO_GEN_MARKER, lines.join("\n"))
}

/// Appends `entries` to the env file at `path` as one block.
///
/// The file is created if needed. Existing assignments are never rewritten,
/// so appending a name the file already assigns leaves two assignments; a
/// warning is logged for each such name.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened or written.
pub fn append_entries<'a, I>(path: impl AsRef<Path>, entries: I) -> EnvCheckResult<()>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let path = path.as_ref();
    let entries: Vec<(&str, &str)> = entries.into_iter().collect();

    if let Ok(existing) = std::fs::read_to_string(path) {
        let assigned: HashSet<String> = parse_names(&existing).into_iter().collect();
        for (name, _) in &entries {
            if assigned.contains(*name) {
                warn!(
                    name = *name,
                    path = %path.display(),
                    "variable already assigned in env file, appending a second assignment"
                );
            }
        }
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| EnvCheckError::io(path, e))?;
    file.write_all(render_block(entries.iter().copied()).as_bytes())
        .map_err(|e| EnvCheckError::io(path, e))?;
    debug!(path = %path.display(), count = entries.len(), "appended env entries");
    Ok(())
}

fn read_existing(path: &Path) -> EnvCheckResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EnvCheckError::EnvFileNotFound {
                path: path.display().to_string(),
            }
        } else {
            EnvCheckError::io(path, e)
        }
    })
}
