//! Core logging types: feature entries, status, and the [`Log`] trait.

/// Feature outcome for summary reporting.
#[derive(Debug, Clone)]
pub struct FeatureEntry {
    /// Feature name (empty for the root feature).
    pub name: String,
    /// Final status of the feature in this run.
    pub status: FeatureStatus,
    /// Optional detail message (e.g., failure reason).
    pub message: Option<String>,
}

/// Status of a feature at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureStatus {
    /// Patch applied and recorded.
    Applied,
    /// Already present in the applied-state record; nothing to do.
    AlreadyApplied,
    /// Dry run: the patch would be applied.
    WouldApply,
    /// Patch was applied during this run, then reversed after a later failure.
    RolledBack,
    /// Patch was applied during this run but could not be reversed.
    RollbackFailed,
    /// Patch failed to apply.
    Failed,
}

/// Abstraction over logging backends.
///
/// The engine logs through this trait so it never depends on how output is
/// rendered; [`Logger`](super::logger::Logger) is the production backend.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a feature outcome for the summary.
    fn record_feature(&self, name: &str, status: FeatureStatus, message: Option<&str>);
}
