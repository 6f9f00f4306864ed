//! Plan execution
//!
//! Steps run strictly in order, one file at a time. A failing step stops the
//! run; files patched by earlier steps stay patched.

use crate::core::error::PatchResult;
use crate::core::insert;
use crate::core::plan::{Operation, PatchPlan, PatchReport, Step, StepOutcome, StepReport};
use crate::core::substitute;
use crate::core::target::{self, ApplyOptions};
use chrono::Utc;

/// Execute every step of `plan`
///
/// `on_step` sees each report as soon as its step finishes, so callers can
/// print notifications before a later step fails.
pub fn execute<F>(plan: &PatchPlan, dry_run: bool, mut on_step: F) -> PatchResult<PatchReport>
where
  F: FnMut(&StepReport),
{
  let mut steps = Vec::with_capacity(plan.len());

  for step in &plan.steps {
    let report = execute_step(step, dry_run)?;
    on_step(&report);
    steps.push(report);
  }

  Ok(PatchReport {
    plan_id: plan.id.clone(),
    dry_run,
    generated_at: Utc::now(),
    steps,
  })
}

/// Execute a single step
pub fn execute_step(step: &Step, dry_run: bool) -> PatchResult<StepReport> {
  let opts = ApplyOptions {
    dry_run,
    require_match: step.require_match,
  };

  match &step.operation {
    Operation::Substitute { path, rules } => {
      let (patch, outcomes) = substitute::apply_substitutions(path, rules, opts)?;
      let before = target::digest(&patch.before);
      let after = target::digest(&patch.after);
      Ok(StepReport {
        label: step.label.clone(),
        path: patch.path,
        outcome: StepOutcome::Substitute { rules: outcomes },
        changed: before != after,
        before,
        after,
        written: patch.written,
      })
    }
    Operation::Insert { path, rule } => {
      let (patch, line) = insert::apply_insertion(path, rule, opts)?;
      let before = target::digest(&patch.before);
      let after = target::digest(&patch.after);
      Ok(StepReport {
        label: step.label.clone(),
        path: patch.path,
        outcome: line.map_or(StepOutcome::NotFound, |line| StepOutcome::Inserted { line }),
        changed: before != after,
        before,
        after,
        written: patch.written,
      })
    }
  }
}
