//! Literal substring replacement over a whole file
//!
//! Rules run in order against the current in-memory content, so a later rule
//! also sees text introduced by an earlier one. Every non-overlapping
//! occurrence of a search literal is replaced. A search literal that is absent
//! leaves the content untouched.

use crate::core::error::{PatchError, PatchResult};
use crate::core::target::{self, ApplyOptions, FilePatch};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A (search, replace) literal pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementRule {
  pub search: String,
  pub replace: String,
}

impl ReplacementRule {
  pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
    Self {
      search: search.into(),
      replace: replace.into(),
    }
  }

  /// An empty search literal matches between every character
  pub fn validate(&self) -> Result<(), String> {
    if self.search.is_empty() {
      return Err("search literal must not be empty".to_string());
    }
    Ok(())
  }
}

/// Result of applying one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RuleOutcome {
  Replaced { occurrences: usize },
  NotFound,
}

impl RuleOutcome {
  pub fn is_found(&self) -> bool {
    matches!(self, RuleOutcome::Replaced { .. })
  }
}

/// Transformed content plus one outcome per rule, in rule order
#[derive(Debug, Clone)]
pub struct SubstitutionOutcome {
  pub content: String,
  pub rules: Vec<RuleOutcome>,
}

impl SubstitutionOutcome {
  /// Indexes of rules that found nothing
  pub fn misses(&self) -> Vec<usize> {
    self
      .rules
      .iter()
      .enumerate()
      .filter(|(_, outcome)| !outcome.is_found())
      .map(|(i, _)| i)
      .collect()
  }
}

/// Apply every rule in sequence to `content`
pub fn substitute(content: &str, rules: &[ReplacementRule]) -> SubstitutionOutcome {
  let mut current = content.to_string();
  let mut outcomes = Vec::with_capacity(rules.len());

  for rule in rules {
    let occurrences = current.matches(rule.search.as_str()).count();
    if occurrences == 0 {
      outcomes.push(RuleOutcome::NotFound);
      continue;
    }
    current = current.replace(rule.search.as_str(), &rule.replace);
    outcomes.push(RuleOutcome::Replaced { occurrences });
  }

  SubstitutionOutcome {
    content: current,
    rules: outcomes,
  }
}

/// Read `path`, apply the rules, write the result back
///
/// The file is written even when no rule matched (the bytes are unchanged in
/// that case) unless this is a dry run. With `require_match`, any rule that
/// found nothing fails the whole call before anything is written.
pub fn apply_substitutions(
  path: &Path,
  rules: &[ReplacementRule],
  opts: ApplyOptions,
) -> PatchResult<(FilePatch, Vec<RuleOutcome>)> {
  let before = target::read(path)?;
  let outcome = substitute(&before, rules);

  if opts.require_match {
    let misses = outcome.misses();
    if let Some(&first) = misses.first() {
      return Err(PatchError::NoMatch {
        path: path.to_path_buf(),
        detail: format!(
          "search literal {:?} not found ({} of {} rules missed)",
          rules[first].search,
          misses.len(),
          rules.len()
        ),
      });
    }
  }

  let written = !opts.dry_run;
  if written {
    target::write(path, &outcome.content)?;
  }

  Ok((
    FilePatch {
      path: path.to_path_buf(),
      before,
      after: outcome.content,
      written,
    },
    outcome.rules,
  ))
}
