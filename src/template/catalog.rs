//! Feature discovery by breadth-first traversal of a template root.
use std::collections::{BTreeSet, VecDeque};
use std::path::Path;

use super::{MARKER_FILE, resolve_dependencies};
use crate::error::TemplateError;
use crate::fs::FileSystemOps;

/// The features available in a template.
///
/// Names are kept in lexicographic order.  The root feature is not part of
/// the name set; its presence is tracked by [`has_root`](Self::has_root).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    features: BTreeSet<String>,
    has_root: bool,
}

impl Catalog {
    /// Build a catalog from known names (mainly for tests and callers that
    /// already hold a feature list).
    #[must_use]
    pub fn from_names<I, S>(names: I, has_root: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            features: names.into_iter().map(Into::into).collect(),
            has_root,
        }
    }

    /// Scan `template_root` for marker files.
    ///
    /// Every directory below the root that directly contains [`MARKER_FILE`]
    /// contributes its root-relative path, joined with `/`.  Directories
    /// without a marker are still traversed.  A marker at the root itself
    /// sets [`has_root`](Self::has_root) instead of adding a name.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Io`] for the first directory that cannot be
    /// read; no partial catalog is returned.
    pub fn discover(fs: &dyn FileSystemOps, template_root: &Path) -> Result<Self, TemplateError> {
        let mut features = BTreeSet::new();
        let mut has_root = false;
        let mut queue = VecDeque::from([String::new()]);

        while let Some(rel) = queue.pop_front() {
            let dir = if rel.is_empty() {
                template_root.to_path_buf()
            } else {
                template_root.join(&rel)
            };
            let entries = fs.read_dir(&dir).map_err(|source| TemplateError::Io {
                path: dir.clone(),
                source,
            })?;

            for entry in entries {
                if entry.is_dir {
                    queue.push_back(if rel.is_empty() {
                        entry.name
                    } else {
                        format!("{rel}/{}", entry.name)
                    });
                } else if entry.name == MARKER_FILE {
                    if rel.is_empty() {
                        has_root = true;
                    } else {
                        features.insert(rel.clone());
                    }
                }
            }
        }

        tracing::debug!(
            "discovered {} features in {} (root feature: {has_root})",
            features.len(),
            template_root.display()
        );
        Ok(Self { features, has_root })
    }

    /// Whether the template has a root feature.
    #[must_use]
    pub const fn has_root(&self) -> bool {
        self.has_root
    }

    /// Whether `feature` is a named feature of this template.
    #[must_use]
    pub fn contains(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    /// Named features in lexicographic order.
    #[must_use]
    pub const fn names(&self) -> &BTreeSet<String> {
        &self.features
    }

    /// Dependency chain of `feature` within this catalog.
    #[must_use]
    pub fn resolve(&self, feature: &str) -> Vec<String> {
        resolve_dependencies(feature, &self.features, self.has_root)
    }
}
