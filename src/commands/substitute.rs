use crate::commands::report::{RunOptions, run_plan};
use crate::core::error::{PatchError, PatchResult};
use crate::core::plan::{Operation, PatchPlan, Step};
use crate::core::substitute::ReplacementRule;
use crate::core::target;
use std::path::{Path, PathBuf};

/// Pair up `--search`/`--replace` values in the order given
pub fn build_rules(searches: Vec<String>, replaces: Vec<String>) -> PatchResult<Vec<ReplacementRule>> {
  if searches.len() != replaces.len() {
    return Err(PatchError::with_help(
      format!(
        "Got {} --search value(s) but {} --replace value(s)",
        searches.len(),
        replaces.len()
      ),
      "Pass one --replace for every --search, in the same order",
    ));
  }

  let rules: Vec<ReplacementRule> = searches
    .into_iter()
    .zip(replaces)
    .map(|(search, replace)| ReplacementRule::new(search, replace))
    .collect();

  for (i, rule) in rules.iter().enumerate() {
    rule
      .validate()
      .map_err(|e| PatchError::message(format!("Rule {}: {}", i + 1, e)))?;
  }

  Ok(rules)
}

/// Run the substitute command
pub fn run_substitute(
  root: &Path,
  file: PathBuf,
  searches: Vec<String>,
  replaces: Vec<String>,
  dry_run: bool,
  json: bool,
  strict: bool,
) -> PatchResult<()> {
  let rules = build_rules(searches, replaces)?;

  let mut plan = PatchPlan::new();
  plan.add_step(Step {
    label: "substitute".to_string(),
    require_match: strict,
    operation: Operation::Substitute {
      path: target::resolve(root, &file),
      rules,
    },
  });

  run_plan(
    &plan,
    RunOptions {
      dry_run,
      json,
      progress: false,
    },
  )?;
  Ok(())
}
