// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed template and target project, a
// fluent builder for template contents, and a fake `git` executor so each
// integration test runs the real command code without spawning processes.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use templater_cli::error::ExecError;
use templater_cli::exec::{ExecResult, Executor};
use templater_cli::fs::SystemFileSystemOps;
use templater_cli::logging::Logger;

/// An isolated template repository and target project backed by a
/// [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory holding `template/` and `project/`.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a context with an empty template and an empty target project.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("template")).expect("create template dir");
        std::fs::create_dir_all(root.path().join("project")).expect("create project dir");
        Self { root }
    }

    /// Path to the template repository.
    pub fn template(&self) -> PathBuf {
        self.root.path().join("template")
    }

    /// Path to the target project.
    pub fn project(&self) -> PathBuf {
        self.root.path().join("project")
    }

    /// Path to the applied-state record of the target project.
    pub fn record_path(&self) -> PathBuf {
        self.project().join(".templater/applied.yml")
    }

    /// Contents of the applied-state record, if it exists.
    pub fn record(&self) -> Option<String> {
        std::fs::read_to_string(self.record_path()).ok()
    }

    /// Write a file relative to the context root.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write file");
        path
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context with an empty template.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Add a feature whose patch creates `<feature-with-dashes>.txt` in the
    /// target.  Pass `""` for the root feature.
    pub fn with_feature(self, feature: &str) -> Self {
        let dir = if feature.is_empty() {
            self.ctx.template()
        } else {
            self.ctx.template().join(feature)
        };
        std::fs::create_dir_all(&dir).expect("create feature dir");
        std::fs::write(dir.join("base.patch"), created_file(feature)).expect("write base.patch");
        self
    }

    /// Add a directory without a marker.
    pub fn with_plain_dir(self, relative: &str) -> Self {
        std::fs::create_dir_all(self.ctx.template().join(relative)).expect("create dir");
        self
    }

    /// Write `templater.toml` at the template root.
    pub fn with_settings(self, content: &str) -> Self {
        std::fs::write(self.ctx.template().join("templater.toml"), content)
            .expect("write templater.toml");
        self
    }

    /// Pre-populate the applied-state record.
    pub fn with_record(self, content: &str) -> Self {
        self.ctx.write("project/.templater/applied.yml", content);
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

/// Name of the file the fake patch for `feature` creates in the target.
pub fn created_file(feature: &str) -> String {
    if feature.is_empty() {
        "root.txt".to_string()
    } else {
        format!("{}.txt", feature.replace('/', "-"))
    }
}

/// Executor standing in for `git apply`.
///
/// The "patch" is a file whose contents name a file to create in the
/// `--directory` target; `--reverse` removes it again.  Patches whose path
/// contains one of the configured fragments fail with exit status 1.
#[derive(Debug, Default)]
pub struct FakeGit {
    failing: Vec<String>,
    calls: Mutex<Vec<Vec<String>>>,
    timeouts: Mutex<Vec<Duration>>,
}

impl FakeGit {
    /// Executor for which every patch applies cleanly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make forward application fail for patches under `feature`.
    pub fn failing_on(mut self, feature: &str) -> Self {
        self.failing.push(format!("{feature}/base.patch"));
        self
    }

    /// Arguments of every invocation, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Patch paths passed to reverse invocations, in order.
    pub fn reversed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|args| args.iter().any(|a| a == "--reverse"))
            .filter_map(|args| args.last().cloned())
            .collect()
    }

    /// Timeouts passed to each invocation.
    pub fn timeouts(&self) -> Vec<Duration> {
        self.timeouts.lock().expect("timeouts lock").clone()
    }
}

impl Executor for FakeGit {
    fn run_with_timeout(
        &self,
        _program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<ExecResult, ExecError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(args.iter().map(ToString::to_string).collect());
        self.timeouts.lock().expect("timeouts lock").push(timeout);

        let reverse = args.contains(&"--reverse");
        let target = args
            .iter()
            .find_map(|a| a.strip_prefix("--directory="))
            .expect("--directory argument");
        let patch = *args.last().expect("patch argument");

        if !reverse && self.failing.iter().any(|f| patch.ends_with(f.as_str())) {
            return Ok(ExecResult::failed(1, "error: patch does not apply"));
        }

        let created = std::fs::read_to_string(patch).expect("read patch");
        let path = Path::new(target).join(created.trim());
        if reverse {
            std::fs::remove_file(path).expect("remove created file");
        } else {
            std::fs::write(path, "").expect("create file");
        }
        Ok(ExecResult::ok())
    }

    fn which(&self, _program: &str) -> bool {
        true
    }
}

/// Logger that writes no log file.
pub fn quiet_logger() -> Logger {
    Logger::with_log_file(None)
}

/// Shared filesystem handle.
pub const FS: SystemFileSystemOps = SystemFileSystemOps;
