//! Status command implementation.
use std::io::Write;

use anyhow::{Context as _, Result};

use crate::cli::StatusOpts;
use crate::fs::FileSystemOps;
use crate::template::display_name;
use crate::template::state::read_applied;

/// Print the features recorded as applied to a target project.
///
/// # Errors
///
/// Returns an error if the applied-state record cannot be read or `out`
/// cannot be written.
pub fn run(opts: &StatusOpts, fs: &dyn FileSystemOps, out: &mut dyn Write) -> Result<()> {
    let applied = read_applied(fs, &opts.target)
        .with_context(|| format!("failed to read status of {}", opts.target.display()))?;

    if applied.is_empty() {
        writeln!(out, "No features applied.")?;
        return Ok(());
    }

    writeln!(out, "Applied features:")?;
    for feature in &applied {
        writeln!(out, "  - {}", display_name(feature))?;
    }
    Ok(())
}
