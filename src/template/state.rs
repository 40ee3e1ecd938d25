//! Applied-state record kept inside the target project.
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TemplateError;
use crate::fs::FileSystemOps;

/// Location of the record relative to the target directory.
pub const STATE_FILE: &str = ".templater/applied.yml";

#[derive(Debug, Default, Deserialize, Serialize)]
struct AppliedRecord {
    #[serde(default)]
    applied: Option<Vec<String>>,
}

/// Path of the applied-state record for `target`.
#[must_use]
pub fn state_path(target: &Path) -> PathBuf {
    target.join(STATE_FILE)
}

/// Read the names already applied to `target`.
///
/// A missing record, an empty document, and `applied: []` all read as an
/// empty list.  The root feature is stored as `""`.
///
/// # Errors
///
/// Returns [`TemplateError::Io`] if the record exists but cannot be read,
/// or [`TemplateError::InvalidState`] if it is not a valid record.
pub fn read_applied(fs: &dyn FileSystemOps, target: &Path) -> Result<Vec<String>, TemplateError> {
    let path = state_path(target);
    let content = match fs.read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(TemplateError::Io { path, source }),
    };
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let record: Option<AppliedRecord> = serde_yaml::from_str(&content)
        .map_err(|source| TemplateError::InvalidState { path, source })?;
    Ok(record.and_then(|r| r.applied).unwrap_or_default())
}

/// Replace the record for `target` with `names`, sorted and deduplicated.
///
/// # Errors
///
/// Returns [`TemplateError::Io`] if the record cannot be written.
pub fn write_applied<I, S>(fs: &dyn FileSystemOps, target: &Path, names: I) -> Result<(), TemplateError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let sorted: BTreeSet<String> = names.into_iter().map(Into::into).collect();
    let record = AppliedRecord {
        applied: Some(sorted.into_iter().collect()),
    };
    let content = serde_yaml::to_string(&record).map_err(TemplateError::SerializeState)?;

    let path = state_path(target);
    tracing::debug!("writing applied-state record to {}", path.display());
    fs.write(&path, &content)
        .map_err(|source| TemplateError::Io { path, source })
}
