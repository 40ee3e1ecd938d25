//! Patch application through an external tool.
use std::path::Path;
use std::time::Duration;

use crate::config::PatchSettings;
use crate::error::ExecError;
use crate::exec::{ExecResult, Executor};

/// Applies and reverses a single feature patch against a target directory.
///
/// A non-zero exit is reported through [`ExecResult::success`]; only
/// failures to run the tool at all (including timeouts) are errors.
#[cfg_attr(test, mockall::automock)]
pub trait PatchApplier {
    /// Apply `patch` to `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch tool cannot be run to completion.
    fn apply(&self, target: &Path, patch: &Path) -> Result<ExecResult, ExecError>;

    /// Reverse a previously applied `patch` in `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch tool cannot be run to completion.
    fn reverse(&self, target: &Path, patch: &Path) -> Result<ExecResult, ExecError>;
}

/// [`PatchApplier`] backed by `git apply`.
///
/// Runs `<program> apply --unsafe-paths [--reverse] --directory=<target>
/// <patch>` so that the target does not need to be a git repository.
#[derive(Debug)]
pub struct GitPatchApplier<'a> {
    executor: &'a dyn Executor,
    program: String,
    timeout: Duration,
}

impl<'a> GitPatchApplier<'a> {
    /// Create an applier running `program` with a per-call `timeout`.
    #[must_use]
    pub fn new(executor: &'a dyn Executor, program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            executor,
            program: program.into(),
            timeout,
        }
    }

    /// Create an applier from `[patch]` settings.
    #[must_use]
    pub fn from_settings(executor: &'a dyn Executor, settings: &PatchSettings) -> Self {
        Self::new(executor, settings.program.clone(), settings.timeout())
    }

    fn run(&self, target: &Path, patch: &Path, reverse: bool) -> Result<ExecResult, ExecError> {
        let directory = format!("--directory={}", target.display());
        let patch = patch.to_string_lossy();
        let mut args = vec!["apply", "--unsafe-paths"];
        if reverse {
            args.push("--reverse");
        }
        args.push(&directory);
        args.push(&patch);

        tracing::debug!("running {} {}", self.program, args.join(" "));
        self.executor
            .run_with_timeout(&self.program, &args, self.timeout)
    }
}

impl PatchApplier for GitPatchApplier<'_> {
    fn apply(&self, target: &Path, patch: &Path) -> Result<ExecResult, ExecError> {
        self.run(target, patch, false)
    }

    fn reverse(&self, target: &Path, patch: &Path) -> Result<ExecResult, ExecError> {
        self.run(target, patch, true)
    }
}
