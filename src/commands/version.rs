//! Command: print version information.
use std::io::Write;

use anyhow::Result;

/// Version string embedded at build time.
pub const VERSION: &str = env!("TEMPLATER_VERSION");

/// Print the templater version.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn run(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "templater {VERSION}")?;
    Ok(())
}
