//! Plan, dry-run and transactional apply of feature patches.
use std::fmt;
use std::path::PathBuf;

use super::state::{read_applied, write_applied};
use super::{Catalog, PatchApplier, Plan, build_plan, display_name, patch_path};
use crate::error::TemplateError;
use crate::fs::FileSystemOps;
use crate::logging::{FeatureStatus, Log};

/// Outcome of a successful apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Features applied in this run, in application order.
    pub applied: Vec<String>,
    /// Requested features (or their dependencies) that were already applied.
    pub already_applied: Vec<String>,
}

/// Applies features from one template to one target directory.
///
/// Nothing is cached between calls: every operation rescans the template
/// and rereads the applied-state record.  Only one engine may operate on a
/// given target at a time.
pub struct Engine<'a> {
    fs: &'a dyn FileSystemOps,
    log: &'a dyn Log,
    template_root: PathBuf,
    target: PathBuf,
}

impl fmt::Debug for Engine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("fs", &self.fs)
            .field("template_root", &self.template_root)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl<'a> Engine<'a> {
    /// Create an engine for `template_root` and `target`.
    #[must_use]
    pub fn new(
        fs: &'a dyn FileSystemOps,
        log: &'a dyn Log,
        template_root: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            log,
            template_root: template_root.into(),
            target: target.into(),
        }
    }

    /// Compute the plan for `requested` without side effects.
    ///
    /// Requested names that are not features of the template are reported
    /// as warnings; their known ancestors are still planned.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be scanned or the
    /// applied-state record cannot be read.
    pub fn plan<S: AsRef<str>>(&self, requested: &[S]) -> Result<Plan, TemplateError> {
        self.plan_with_record(requested).map(|(plan, _)| plan)
    }

    /// Plan `requested` and also return the record the plan was built from.
    fn plan_with_record<S: AsRef<str>>(
        &self,
        requested: &[S],
    ) -> Result<(Plan, Vec<String>), TemplateError> {
        let catalog = Catalog::discover(self.fs, &self.template_root)?;
        for name in requested.iter().map(AsRef::as_ref) {
            let known = if name.is_empty() {
                catalog.has_root()
            } else {
                catalog.contains(name)
            };
            if !known {
                self.log.warn(&format!(
                    "unknown feature '{name}' in {}",
                    self.template_root.display()
                ));
            }
        }

        let applied = read_applied(self.fs, &self.target)?;
        let plan = build_plan(&catalog, &applied, requested);
        self.log.debug(&format!(
            "plan: {} to apply, {} already applied",
            plan.to_apply.len(),
            plan.already_applied.len()
        ));
        Ok((plan, applied))
    }

    /// Report what [`apply`](Self::apply) would do, without touching the
    /// target or its applied-state record.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`plan`](Self::plan).
    pub fn dry_run<S: AsRef<str>>(&self, requested: &[S]) -> Result<Plan, TemplateError> {
        self.log.stage("Planning features");
        let plan = self.plan(requested)?;
        for feature in &plan.to_apply {
            let patch = patch_path(&self.template_root, feature);
            self.log.dry_run(&format!(
                "would apply {} ({})",
                display_name(feature),
                patch.display()
            ));
            self.log
                .record_feature(feature, FeatureStatus::WouldApply, None);
        }
        for feature in &plan.already_applied {
            self.log
                .record_feature(feature, FeatureStatus::AlreadyApplied, None);
        }
        Ok(plan)
    }

    /// Apply `requested` and their dependencies as a single transaction.
    ///
    /// Patches run in plan order.  On the first failure every patch applied
    /// so far is reversed in reverse order; reverse failures are logged and
    /// do not stop the rollback.  The applied-state record is only rewritten
    /// when every patch succeeded; if that write fails, the patches of this
    /// run are reversed as well.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::PatchFailed`] or
    /// [`TemplateError::PatchInvocation`] naming the first feature that
    /// failed, or a planning/record error.  A record error after patching
    /// is returned once the run has been rolled back.
    pub fn apply<S: AsRef<str>>(
        &self,
        applier: &dyn PatchApplier,
        requested: &[S],
    ) -> Result<ApplyReport, TemplateError> {
        self.log.stage("Applying features");
        let (
            Plan {
                to_apply,
                already_applied,
            },
            prior,
        ) = self.plan_with_record(requested)?;

        let mut applied: Vec<String> = Vec::with_capacity(to_apply.len());
        for feature in to_apply {
            if let Err(err) = self.apply_one(applier, &feature) {
                self.log.error(&err.to_string());
                self.log
                    .record_feature(&feature, FeatureStatus::Failed, Some(&err.to_string()));
                self.rollback(applier, &applied);
                return Err(err);
            }
            applied.push(feature);
        }

        if !applied.is_empty()
            && let Err(err) = write_applied(
                self.fs,
                &self.target,
                prior.iter().chain(&applied).map(String::as_str),
            )
        {
            self.log.error(&err.to_string());
            self.rollback(applier, &applied);
            return Err(err);
        }

        for feature in &applied {
            self.log
                .record_feature(feature, FeatureStatus::Applied, None);
        }
        for feature in &already_applied {
            self.log
                .record_feature(feature, FeatureStatus::AlreadyApplied, None);
        }
        Ok(ApplyReport {
            applied,
            already_applied,
        })
    }

    fn apply_one(&self, applier: &dyn PatchApplier, feature: &str) -> Result<(), TemplateError> {
        let patch = patch_path(&self.template_root, feature);
        self.log
            .info(&format!("applying {}", display_name(feature)));

        let result = applier
            .apply(&self.target, &patch)
            .map_err(|source| TemplateError::PatchInvocation {
                feature: feature.to_string(),
                source,
            })?;
        if !result.success {
            return Err(TemplateError::PatchFailed {
                feature: feature.to_string(),
                code: result.code,
                stderr: result.stderr,
            });
        }
        self.log
            .debug(&format!("applied {}", patch.display()));
        Ok(())
    }

    fn rollback(&self, applier: &dyn PatchApplier, applied: &[String]) {
        if applied.is_empty() {
            return;
        }
        self.log.stage("Rolling back");
        for feature in applied.iter().rev() {
            let patch = patch_path(&self.template_root, feature);
            let failure = match applier.reverse(&self.target, &patch) {
                Ok(result) if result.success => None,
                Ok(result) => Some(result.stderr.trim().to_string()),
                Err(e) => Some(e.to_string()),
            };
            match failure {
                None => {
                    self.log
                        .info(&format!("reversed {}", display_name(feature)));
                    self.log
                        .record_feature(feature, FeatureStatus::RolledBack, None);
                }
                Some(reason) => {
                    self.log.warn(&format!(
                        "failed to reverse {}: {reason}",
                        display_name(feature)
                    ));
                    self.log.record_feature(
                        feature,
                        FeatureStatus::RollbackFailed,
                        Some(&format!("rollback failed: {reason}")),
                    );
                }
            }
        }
    }
}
