//! Patch plans and reports
//!
//! Every run first builds a `PatchPlan` from the selected recipes (or from the
//! ad-hoc rules given on the command line), then executes it. The plan is
//! what `--dry-run` shows; the report is what every run prints at the end.
//!
//! ```text
//! Command (substitute, insert, apply)
//!   ↓
//! PatchPlan (what to do)
//!   ↓
//! executor::execute (read → transform → write, per step)
//!   ↓
//! PatchReport
//! ```

use crate::core::config::{RecipeConfig, RecipeKind};
use crate::core::error::PatchResult;
use crate::core::insert::InsertionRule;
use crate::core::substitute::{ReplacementRule, RuleOutcome};
use crate::core::target;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};

/// Plan identifier (SHA256 hash of plan contents)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanId(String);

impl PlanId {
  /// Create a plan ID from plan contents
  pub fn from_contents(contents: &[u8]) -> Self {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    let result = hasher.finalize();
    Self(format!("{:x}", result))
  }

  /// Get the short ID (first 12 characters)
  pub fn short(&self) -> &str {
    &self.0[..12.min(self.0.len())]
  }
}

impl fmt::Display for PlanId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.short())
  }
}

/// One patch against one file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
  /// Literal substitutions over the whole file
  Substitute { path: PathBuf, rules: Vec<ReplacementRule> },

  /// Guarded line replacement
  Insert { path: PathBuf, rule: InsertionRule },
}

/// A labelled operation, with the escalation policy for misses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
  /// Recipe name, or the command name for ad-hoc runs
  pub label: String,
  pub require_match: bool,
  pub operation: Operation,
}

/// A plan represents a sequence of steps to perform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchPlan {
  pub id: PlanId,
  pub steps: Vec<Step>,
}

impl Default for PatchPlan {
  fn default() -> Self {
    Self::new()
  }
}

impl PatchPlan {
  /// Create an empty plan
  pub fn new() -> Self {
    Self {
      id: PlanId::from_contents(&[]),
      steps: Vec::new(),
    }
  }

  /// Add a step to the plan
  pub fn add_step(&mut self, step: Step) {
    self.steps.push(step);
    self.recompute_id();
  }

  /// Add a recipe, with target paths resolved against `root`
  pub fn add_recipe(&mut self, recipe: &RecipeConfig, root: &Path, strict: bool) {
    let path = target::resolve(root, &recipe.file);
    let operation = match recipe.kind() {
      RecipeKind::Substitute(rules) => Operation::Substitute {
        path,
        rules: rules.to_vec(),
      },
      RecipeKind::Insert(rule) => Operation::Insert {
        path,
        rule: rule.clone(),
      },
    };
    self.add_step(Step {
      label: recipe.name.clone(),
      require_match: strict || recipe.require_match,
      operation,
    });
  }

  /// Recompute plan ID based on current contents
  fn recompute_id(&mut self) {
    let json = serde_json::to_vec(&self.steps).unwrap_or_default();
    self.id = PlanId::from_contents(&json);
  }

  /// Get human-readable representation
  pub fn to_human_readable(&self) -> String {
    let mut output = String::new();

    output.push_str(&format!("📋 Plan: {}\n", self.id));
    output.push_str(&format!("\n   Steps ({}):\n", self.steps.len()));

    for (i, step) in self.steps.iter().enumerate() {
      output.push_str(&format!("   {}. {}\n", i + 1, step_to_string(step)));
    }

    output
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }
}

/// Convert a step to a human-readable string
fn step_to_string(step: &Step) -> String {
  let strict = if step.require_match { " [strict]" } else { "" };
  match &step.operation {
    Operation::Substitute { path, rules } => format!(
      "{}: substitute {} rule(s) in {}{}",
      step.label,
      rules.len(),
      path.display(),
      strict
    ),
    Operation::Insert { path, rule } => format!(
      "{}: replace line after {:?} matching {:?} in {}{}",
      step.label,
      rule.guard,
      rule.trigger,
      path.display(),
      strict
    ),
  }
}

/// Outcome of one executed step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepOutcome {
  Substitute { rules: Vec<RuleOutcome> },
  Inserted { line: usize },
  NotFound,
}

impl StepOutcome {
  pub fn is_match(&self) -> bool {
    match self {
      StepOutcome::Substitute { rules } => rules.iter().any(RuleOutcome::is_found),
      StepOutcome::Inserted { .. } => true,
      StepOutcome::NotFound => false,
    }
  }
}

/// What happened to one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
  pub label: String,
  pub path: PathBuf,
  pub outcome: StepOutcome,
  /// SHA-256 of the content before the patch
  pub before: String,
  /// SHA-256 of the content after the patch
  pub after: String,
  pub changed: bool,
  pub written: bool,
}

/// Summary of an executed plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchReport {
  pub plan_id: PlanId,
  pub dry_run: bool,
  pub generated_at: DateTime<Utc>,
  pub steps: Vec<StepReport>,
}

impl PatchReport {
  pub fn to_json(&self) -> PatchResult<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  pub fn matched_count(&self) -> usize {
    self.steps.iter().filter(|s| s.outcome.is_match()).count()
  }

  pub fn changed_count(&self) -> usize {
    self.steps.iter().filter(|s| s.changed).count()
  }
}
