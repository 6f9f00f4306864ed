use crate::commands::report::{RunOptions, run_plan};
use crate::core::config::PatchConfig;
use crate::core::error::{PatchError, PatchResult};
use crate::core::plan::PatchPlan;
use crate::core::recipes::RecipeBook;
use std::path::Path;

/// Run the apply command
///
/// Recipes run in the order named on the command line, or in book order with
/// `--all`. Config recipes shadow built-ins of the same name.
pub fn run_apply(root: &Path, names: Vec<String>, all: bool, dry_run: bool, json: bool, strict: bool) -> PatchResult<()> {
  let config = PatchConfig::load_optional(root)?;
  let book = RecipeBook::new(&config);

  let recipes = match (all, names.is_empty()) {
    (true, true) => book.all(),
    (false, false) => book.select(&names)?,
    (true, false) => {
      return Err(PatchError::with_help(
        "Cannot combine recipe names with --all",
        "Either name the recipes to apply or pass --all",
      ));
    }
    (false, true) => {
      return Err(PatchError::with_help(
        "No recipe given",
        "Name one or more recipes (see `textpatch list`) or pass --all",
      ));
    }
  };

  let mut plan = PatchPlan::new();
  for recipe in recipes {
    plan.add_recipe(recipe, root, strict);
  }

  let report = run_plan(
    &plan,
    RunOptions {
      dry_run,
      json,
      progress: true,
    },
  )?;

  if !json {
    let verb = if dry_run { "would change" } else { "changed" };
    println!(
      "\n📊 {}/{} recipe(s) matched, {} file(s) {} (plan {})",
      report.matched_count(),
      report.steps.len(),
      report.changed_count(),
      verb,
      report.plan_id
    );
  }

  Ok(())
}
