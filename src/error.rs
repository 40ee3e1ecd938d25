//! Domain-specific error types for the templater engine.
//!
//! Internal modules return typed errors while command handlers at the CLI
//! boundary convert them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ExecError      : spawning or waiting on an external program, timeouts
//! TemplateError  : catalog traversal, applied-state record, patch steps
//! ConfigError    : templater.toml and features files
//! ```

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::template::display_name;

/// Errors raised while running an external program.
///
/// A program that runs to completion with a non-zero exit code is **not** an
/// `ExecError`; callers inspect [`ExecResult`](crate::exec::ExecResult) for
/// that.  These variants cover invocation failures only.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The program could not be started.
    #[error("failed to execute '{program}': {source}")]
    Spawn {
        /// Name of the program that was invoked.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Waiting for the program or collecting its output failed.
    #[error("failed waiting for '{program}': {source}")]
    Wait {
        /// Name of the program that was invoked.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The program did not finish within its time limit and was killed.
    #[error("'{program}' timed out after {}s", .timeout.as_secs())]
    Timeout {
        /// Name of the program that was invoked.
        program: String,
        /// Time limit that was exceeded.
        timeout: Duration,
    },
}

/// Errors raised by the feature catalog, the applied-state store and the
/// apply engine.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// A template or target path could not be read or written.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path that could not be accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The applied-state record exists but is not valid YAML.
    #[error("malformed applied-state record {}: {source}", .path.display())]
    InvalidState {
        /// Path of the malformed record.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_yaml::Error,
    },

    /// The applied-state record could not be serialized.
    #[error("failed to serialize applied-state record: {0}")]
    SerializeState(#[source] serde_yaml::Error),

    /// The patch tool ran but exited unsuccessfully.
    #[error(
        "failed to apply {} (exit {}): {}",
        display_name(.feature),
        .code.unwrap_or(-1),
        .stderr.trim()
    )]
    PatchFailed {
        /// Feature whose patch failed.
        feature: String,
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Captured standard error output.
        stderr: String,
    },

    /// The patch tool could not be run (spawn failure or timeout).
    #[error("failed to apply {}: {source}", display_name(.feature))]
    PatchInvocation {
        /// Feature whose patch could not be run.
        feature: String,
        /// Underlying invocation error.
        source: ExecError,
    },
}

/// Errors that arise from loading configuration and feature lists.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration file could not be read.
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// `templater.toml` is not valid TOML or contains unknown keys.
    #[error("invalid settings in {}: {source}", .path.display())]
    InvalidSettings {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying parse error.
        source: toml::de::Error,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn exec_timeout_display() {
        let e = ExecError::Timeout {
            program: "git".to_string(),
            timeout: Duration::from_secs(30),
        };
        assert_eq!(e.to_string(), "'git' timed out after 30s");
    }

    #[test]
    fn exec_spawn_has_source() {
        let e = ExecError::Spawn {
            program: "git".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("git"));
    }

    #[test]
    fn patch_failed_names_feature_and_stderr() {
        let e = TemplateError::PatchFailed {
            feature: "auth/oauth".to_string(),
            code: Some(1),
            stderr: "patch does not apply\n".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "failed to apply auth/oauth (exit 1): patch does not apply"
        );
    }

    #[test]
    fn patch_failed_for_root_feature_uses_root_label() {
        let e = TemplateError::PatchFailed {
            feature: String::new(),
            code: None,
            stderr: "corrupt patch".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "failed to apply (root) (exit -1): corrupt patch"
        );
    }

    #[test]
    fn patch_invocation_wraps_timeout() {
        let e = TemplateError::PatchInvocation {
            feature: "database".to_string(),
            source: ExecError::Timeout {
                program: "git".to_string(),
                timeout: Duration::from_secs(5),
            },
        };
        assert!(e.to_string().contains("database"));
        assert!(e.to_string().contains("timed out after 5s"));
        assert!(e.source().is_some());
    }

    #[test]
    fn io_error_display_includes_path() {
        let e = TemplateError::Io {
            path: PathBuf::from("/templates/auth"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.to_string().contains("/templates/auth"));
        assert!(e.source().is_some());
    }

    #[test]
    fn invalid_state_display_includes_path() {
        let source = serde_yaml::from_str::<Vec<String>>("{").unwrap_err();
        let e = TemplateError::InvalidState {
            path: PathBuf::from("project/.templater/applied.yml"),
            source,
        };
        assert!(e.to_string().contains("applied.yml"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ExecError>();
        assert_send_sync::<TemplateError>();
        assert_send_sync::<ConfigError>();
    }

    #[test]
    fn template_error_converts_to_anyhow() {
        let e = TemplateError::SerializeState(
            serde_yaml::from_str::<Vec<String>>("{").unwrap_err(),
        );
        let _anyhow_err: anyhow::Error = e.into();
    }
}
