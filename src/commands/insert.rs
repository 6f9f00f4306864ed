use crate::commands::report::{RunOptions, run_plan};
use crate::core::error::{PatchError, PatchResult};
use crate::core::insert::InsertionRule;
use crate::core::plan::{Operation, PatchPlan, Step};
use crate::core::target;
use std::path::{Path, PathBuf};

/// Where the replacement block comes from
#[derive(Debug, Clone)]
pub enum BlockSource {
  Inline(String),
  File(PathBuf),
}

impl BlockSource {
  /// Load the block text; a block file is used verbatim, minus one trailing newline
  pub fn load(self, root: &Path) -> PatchResult<String> {
    match self {
      BlockSource::Inline(text) => Ok(text),
      BlockSource::File(path) => {
        let path = target::resolve(root, &path);
        let text = target::read(&path)?;
        Ok(text.strip_suffix('\n').map(str::to_string).unwrap_or(text))
      }
    }
  }
}

/// Run the insert command
#[allow(clippy::too_many_arguments)]
pub fn run_insert(
  root: &Path,
  file: PathBuf,
  trigger: String,
  guard: String,
  block: BlockSource,
  dry_run: bool,
  json: bool,
  strict: bool,
) -> PatchResult<()> {
  let rule = InsertionRule::new(trigger, guard, block.load(root)?);
  rule.validate().map_err(PatchError::message)?;

  let mut plan = PatchPlan::new();
  plan.add_step(Step {
    label: "insert".to_string(),
    require_match: strict,
    operation: Operation::Insert {
      path: target::resolve(root, &file),
      rule,
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
