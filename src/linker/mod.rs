//! The full link run: validate, scan, plan, execute.

use crate::config::{ConfigError, LinkOptions};
use crate::executor::{execute, ExecuteError};
use crate::planner::{plan, PlanError};
use crate::reporter::{Reporter, RunEvent};
use crate::scanner::{scan, ScanError};
use crate::utils::now_iso;
use serde::Serialize;
use thiserror::Error;
use tracing::info_span;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Scan error: {0}")]
    ScanError(#[from] ScanError),

    #[error("Plan error: {0}")]
    PlanError(#[from] PlanError),

    #[error("Execution error: {0}")]
    ExecuteError(#[from] ExecuteError),
}

/// Outcome of a successful run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: String,
    pub dry_run: bool,
    pub created: usize,
    pub replaced: usize,
    pub skipped: usize,
    /// Rendered text report
    pub report: String,
}

/// Run the whole pipeline for `options`.
///
/// Scanning completes before planning starts, and planning completes before
/// anything is mutated, so scan and plan failures leave the link tree alone.
pub fn run(options: &LinkOptions, reporter: &dyn Reporter) -> Result<RunSummary, LinkError> {
    options.validate()?;
    let options = options.resolved()?;

    let run_id = Uuid::new_v4();
    let started_at = now_iso();
    let _run_span = info_span!("link_run", run_id = %run_id).entered();
    reporter.report(RunEvent::RunStarted {
        run_id: run_id.to_string(),
        data_dir: options.data_dir.clone(),
        link_dir: options.link_dir.clone(),
        dry_run: options.dry_run,
    });

    let records = scan(
        &options.data_dir,
        options.mode.clone(),
        options.keyspaces.as_ref(),
        reporter,
    )
    .collect::<Result<Vec<_>, _>>()?;

    let actions = plan(
        records,
        &options.link_dir,
        options.replace_existing,
        reporter,
    )?;

    let report = execute(&actions, options.dry_run, reporter)?;

    Ok(RunSummary {
        run_id,
        started_at,
        dry_run: options.dry_run,
        created: report.created,
        replaced: report.replaced,
        skipped: report.skipped,
        report: report.to_string(),
    })
}
