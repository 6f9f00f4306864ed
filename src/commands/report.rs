//! Shared plan runner and report rendering for the patching commands

use crate::core::error::PatchResult;
use crate::core::executor;
use crate::core::plan::{PatchPlan, PatchReport, StepOutcome, StepReport};
use crate::core::substitute::RuleOutcome;
use crate::ui::progress::StepProgress;
use std::io::IsTerminal;

/// How a command wants its run rendered
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
  pub dry_run: bool,
  pub json: bool,
  /// Draw a progress bar (human output on a terminal only)
  pub progress: bool,
}

/// Execute a plan and print per-step notifications or a JSON report
pub fn run_plan(plan: &PatchPlan, opts: RunOptions) -> PatchResult<PatchReport> {
  if opts.dry_run && !opts.json {
    println!("{}", plan.to_human_readable());
  }

  let show_progress = opts.progress && !opts.json && plan.len() > 1 && std::io::stderr().is_terminal();
  let mut progress = show_progress.then(|| StepProgress::new(plan.len(), "Patching"));

  let report = executor::execute(plan, opts.dry_run, |step| {
    if let Some(bar) = progress.as_mut() {
      bar.inc();
    }
    if !opts.json
      && let Some(line) = notification(step, opts.dry_run)
    {
      println!("{}", line);
    }
  })?;

  if opts.json {
    println!("{}", report.to_json()?);
  }

  Ok(report)
}

/// Success line for a finished step, `None` when the step stays silent
///
/// An insertion that found nothing prints nothing. A substitution always
/// reports, since the file is rewritten either way.
pub fn notification(step: &StepReport, dry_run: bool) -> Option<String> {
  let (marker, verb) = if dry_run { ("🔍", "Would patch") } else { ("✅", "Patched") };

  match &step.outcome {
    StepOutcome::Substitute { rules } => {
      let replaced: usize = rules
        .iter()
        .map(|r| match r {
          RuleOutcome::Replaced { occurrences } => *occurrences,
          RuleOutcome::NotFound => 0,
        })
        .sum();
      let missed = rules.iter().filter(|r| !r.is_found()).count();

      let mut line = format!(
        "{} {} {} ({}): {} replacement(s)",
        marker,
        verb,
        step.path.display(),
        step.label,
        replaced
      );
      if missed > 0 {
        line.push_str(&format!(", {} rule(s) found nothing", missed));
      }
      Some(line)
    }
    StepOutcome::Inserted { line } => Some(format!(
      "{} {} {} ({}): replaced line {}",
      marker,
      verb,
      step.path.display(),
      step.label,
      line + 1
    )),
    StepOutcome::NotFound => None,
  }
}
