//! Subcommand implementations.
pub mod apply;
pub mod list;
pub mod status;
pub mod version;

use anyhow::{Context as _, Result};

use crate::cli::ApplyOpts;
use crate::config::features_file;
use crate::fs::FileSystemOps;
use crate::template::{display_name, normalize_name};

/// Collect the features requested on the command line or in `--file`.
///
/// Names are normalised (whitespace and surrounding `/` stripped) and
/// duplicates are kept, since planning deduplicates anyway.
///
/// # Errors
///
/// Returns an error if the features file cannot be read or no feature was
/// requested at all.
pub fn requested_features(opts: &ApplyOpts, fs: &dyn FileSystemOps) -> Result<Vec<String>> {
    let raw = match &opts.file {
        Some(path) => features_file::load(fs, path)
            .with_context(|| format!("failed to read features file {}", path.display()))?,
        None => opts.features.clone(),
    };

    let features: Vec<String> = raw
        .iter()
        .map(|name| normalize_name(name))
        .filter(|name| !name.is_empty())
        .collect();
    if features.is_empty() {
        anyhow::bail!("no features specified");
    }
    Ok(features)
}

/// Join feature names for display, showing the root feature as `(root)`.
#[must_use]
pub fn join_names(features: &[String]) -> String {
    features
        .iter()
        .map(|f| display_name(f))
        .collect::<Vec<_>>()
        .join(", ")
}
