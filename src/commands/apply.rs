//! Apply command implementation.
use std::io::Write;

use anyhow::{Context as _, Result};

use super::{join_names, requested_features};
use crate::cli::ApplyOpts;
use crate::config::Settings;
use crate::exec::Executor;
use crate::fs::FileSystemOps;
use crate::logging::Logger;
use crate::template::{ApplyReport, Engine, GitPatchApplier, Plan, display_name};

/// Apply the requested features (or preview them with `--dry-run`).
///
/// # Errors
///
/// Returns an error if no features were requested, the settings are
/// invalid, the patch program is missing, or any patch fails to apply (in
/// which case earlier patches of this run have been reversed).
pub fn run(
    opts: &ApplyOpts,
    fs: &dyn FileSystemOps,
    executor: &dyn Executor,
    log: &Logger,
    out: &mut dyn Write,
) -> Result<()> {
    let requested = requested_features(opts, fs)?;

    let mut settings = Settings::load(fs, &opts.template)?;
    if let Some(secs) = opts.timeout {
        settings.patch.timeout_secs = secs;
    }
    log.debug(&format!(
        "patch program: {} (timeout {}s)",
        settings.patch.program, settings.patch.timeout_secs
    ));

    let engine = Engine::new(fs, log, &opts.template, &opts.target);

    if opts.dry_run {
        let plan = engine.dry_run(&requested)?;
        log.print_summary();
        return write_plan(out, &plan);
    }

    if !executor.which(&settings.patch.program) {
        anyhow::bail!("'{}' not found on PATH", settings.patch.program);
    }
    let applier = GitPatchApplier::from_settings(executor, &settings.patch);
    let result = engine.apply(&applier, &requested);
    log.print_summary();
    let report = result
        .with_context(|| format!("failed to apply features to {}", opts.target.display()))?;
    write_report(out, &report)
}

fn write_plan(out: &mut dyn Write, plan: &Plan) -> Result<()> {
    if plan.is_noop() {
        writeln!(out, "Nothing to apply.")?;
    } else {
        writeln!(out, "Would apply:")?;
        for (i, feature) in plan.to_apply.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, display_name(feature))?;
        }
    }
    if !plan.already_applied.is_empty() {
        writeln!(
            out,
            "Already applied: {}",
            join_names(&plan.already_applied)
        )?;
    }
    Ok(())
}

fn write_report(out: &mut dyn Write, report: &ApplyReport) -> Result<()> {
    for feature in &report.applied {
        writeln!(out, "Applying {}... done", display_name(feature))?;
    }

    let count = report.applied.len();
    write!(
        out,
        "\nApplied {count} {}.",
        if count == 1 { "feature" } else { "features" }
    )?;
    if !report.already_applied.is_empty() {
        write!(
            out,
            " ({} already applied: {})",
            report.already_applied.len(),
            join_names(&report.already_applied)
        )?;
    }
    writeln!(out)?;
    Ok(())
}
