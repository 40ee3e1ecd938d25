//! List command implementation.
use std::io::Write;

use anyhow::{Context as _, Result};

use crate::cli::ListOpts;
use crate::fs::FileSystemOps;
use crate::template::Catalog;
use crate::template::tree::render_tree;

/// Print the features of a template as an ASCII tree.
///
/// # Errors
///
/// Returns an error if the template cannot be scanned or `out` cannot be
/// written.
pub fn run(opts: &ListOpts, fs: &dyn FileSystemOps, out: &mut dyn Write) -> Result<()> {
    let catalog = Catalog::discover(fs, &opts.template)
        .with_context(|| format!("failed to list features in {}", opts.template.display()))?;
    let names: Vec<String> = catalog.names().iter().cloned().collect();
    out.write_all(render_tree(&names).as_bytes())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::fs::MemoryFileSystem;

    fn list(fs: &MemoryFileSystem) -> Result<String> {
        let mut out: Vec<u8> = Vec::new();
        run(
            &ListOpts {
                template: PathBuf::from("tpl"),
            },
            fs,
            &mut out,
        )?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn prints_sorted_tree() {
        let fs = MemoryFileSystem::new()
            .with_file("tpl/base.patch", "")
            .with_file("tpl/database/base.patch", "")
            .with_file("tpl/auth/oauth/base.patch", "")
            .with_file("tpl/auth/base.patch", "");

        assert_eq!(
            list(&fs).unwrap(),
            "├── auth\n│   └── oauth\n└── database\n"
        );
    }

    #[test]
    fn empty_template_prints_nothing() {
        let fs = MemoryFileSystem::new().with_dir("tpl");
        assert_eq!(list(&fs).unwrap(), "");
    }

    #[test]
    fn missing_template_is_an_error() {
        let fs = MemoryFileSystem::new();
        let err = list(&fs).unwrap_err();
        assert!(err.to_string().contains("failed to list features in tpl"), "got {err:#}");
    }
}
