use crate::planner::{ActionKind, PlanAction};
use serde::Serialize;
use std::fmt;

const DRY_RUN_HEADER: &str = "Dry run: no changes made.";
const LIVE_HEADER: &str = "Linked snapshots:";

/// Human readable outcome of executing a plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    pub dry_run: bool,
    pub lines: Vec<String>,
    pub created: usize,
    pub replaced: usize,
    pub skipped: usize,
}

impl ExecutionReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Record one action, adding its lines unless it is a skip
    pub fn record(&mut self, action: &PlanAction) {
        match action.kind {
            ActionKind::Skip => {
                self.skipped += 1;
                return;
            }
            ActionKind::Replace => {
                self.replaced += 1;
                self.lines
                    .push(format!("remove link {}", action.link_path.display()));
            }
            ActionKind::Create => self.created += 1,
        }
        self.lines.push(format!(
            "link {} -> {}",
            action.link_path.display(),
            action.target_path.display()
        ));
    }

    /// Whether any link was (or would be) created
    pub fn linked_anything(&self) -> bool {
        self.created + self.replaced > 0
    }
}

impl fmt::Display for ExecutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", if self.dry_run { DRY_RUN_HEADER } else { LIVE_HEADER })?;
        if !self.linked_anything() {
            writeln!(
                f,
                "{}",
                if self.dry_run { "Nothing to link." } else { "Nothing linked." }
            )?;
        }
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(
            f,
            "{} created, {} replaced, {} skipped.",
            self.created, self.replaced, self.skipped
        )
    }
}
