//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{FeatureEntry, FeatureStatus, Log};
use super::utils::log_file_path;
use crate::template::display_name;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with dry-run awareness and summary collection.
///
/// Console and file output go through [`tracing`]; the file itself is
/// created by [`init_subscriber`](super::subscriber::init_subscriber) at
/// `$XDG_CACHE_HOME/templater/<command>.log`.
#[derive(Debug)]
pub struct Logger {
    features: Mutex<Vec<FeatureEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Only stores the log file path for display in the summary; this
    /// constructor does not write to the file.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(log_file_path(command))
    }

    /// Create a logger that reports `log_file` in its summary.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self {
            features: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded feature entries.
    #[must_use]
    pub fn feature_entries(&self) -> Vec<FeatureEntry> {
        self.features.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record a feature outcome for the summary.
    pub fn record_feature(&self, name: &str, status: FeatureStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.features.lock() {
            guard.push(FeatureEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the recorded features with `status`.
    #[must_use]
    pub fn count(&self, status: FeatureStatus) -> usize {
        self.features
            .lock()
            .map_or(0, |guard| guard.iter().filter(|f| f.status == status).count())
    }

    /// Print the summary of all recorded features.
    pub fn print_summary(&self) {
        let features = self.feature_entries();
        if features.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut applied = 0u32;
        let mut already = 0u32;
        let mut would_apply = 0u32;
        let mut rolled_back = 0u32;
        let mut stuck = 0u32;
        let mut failed = 0u32;

        for feature in &features {
            let (icon, color) = match feature.status {
                FeatureStatus::Applied => {
                    applied += 1;
                    ("✓", "\x1b[32m")
                }
                FeatureStatus::AlreadyApplied => {
                    already += 1;
                    ("·", "\x1b[2m")
                }
                FeatureStatus::WouldApply => {
                    would_apply += 1;
                    ("~", "\x1b[37m")
                }
                FeatureStatus::RolledBack => {
                    rolled_back += 1;
                    ("↺", "\x1b[33m")
                }
                FeatureStatus::RollbackFailed => {
                    stuck += 1;
                    ("!", "\x1b[35m")
                }
                FeatureStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = feature
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!(
                "{color}{icon} {}{suffix}\x1b[0m",
                display_name(&feature.name)
            ));
        }

        self.info(&format!(
            "{} features: \x1b[32m{applied} applied\x1b[0m, \x1b[2m{already} already applied\x1b[0m, \x1b[37m{would_apply} would apply\x1b[0m, \x1b[33m{rolled_back} rolled back\x1b[0m, \x1b[35m{stuck} not reversed\x1b[0m, \x1b[31m{failed} failed\x1b[0m",
            features.len()
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_feature(&self, name: &str, status: FeatureStatus, message: Option<&str>) {
        self.record_feature(name, status, message);
    }
}
