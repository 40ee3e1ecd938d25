//! Feature list files: one requested feature per line.
use std::path::Path;

use crate::error::ConfigError;
use crate::fs::FileSystemOps;

/// Parse feature names from `content`.
///
/// Lines are trimmed; blank lines and lines starting with `#` are ignored.
#[must_use]
pub fn parse(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Read and parse the feature list at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load(fs: &dyn FileSystemOps, path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = fs.read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&content))
}
