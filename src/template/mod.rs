//! Feature templates: discovery, dependency resolution, applied-state
//! bookkeeping, and the transactional apply engine.
//!
//! A template is a directory tree in which every directory containing a
//! [`MARKER_FILE`] is a *feature*, named by its `/`-joined path relative to
//! the template root.  A marker directly at the root denotes the unnamed
//! *root feature*, represented by the empty string.
pub mod catalog;
pub mod engine;
pub mod patch;
pub mod plan;
pub mod resolve;
pub mod state;
pub mod tree;

pub use catalog::Catalog;
pub use engine::{ApplyReport, Engine};
pub use patch::{GitPatchApplier, PatchApplier};
pub use plan::{Plan, build_plan};
pub use resolve::resolve_dependencies;

use std::path::{Path, PathBuf};

/// File whose presence marks a directory as a feature.
pub const MARKER_FILE: &str = "base.patch";

/// Label used in output for the root feature.
pub const ROOT_LABEL: &str = "(root)";

/// Human-readable name of a feature; the root feature is shown as `(root)`.
#[must_use]
pub fn display_name(feature: &str) -> &str {
    if feature.is_empty() { ROOT_LABEL } else { feature }
}

/// Location of the patch for `feature` under `template_root`.
#[must_use]
pub fn patch_path(template_root: &Path, feature: &str) -> PathBuf {
    if feature.is_empty() {
        template_root.join(MARKER_FILE)
    } else {
        template_root.join(feature).join(MARKER_FILE)
    }
}

/// Normalise a user-supplied feature name: surrounding whitespace and
/// leading/trailing slashes are removed.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    raw.trim().trim_matches('/').to_string()
}
