//! Guarded line replacement
//!
//! The content is split on `\n` (a `\r` stays part of its line) and scanned from
//! the second line down. The first line that contains the trigger, and whose
//! previous line contains the guard, is replaced by the block. Later matches
//! are left alone. Lines are joined back with `\n`, so a trailing newline
//! survives the round trip.

use crate::core::error::{PatchError, PatchResult};
use crate::core::target::{self, ApplyOptions, FilePatch};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Trigger/guard predicates plus the block substituted for the matched line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionRule {
  /// Text identifying the line to replace
  pub trigger: String,
  /// Text the immediately preceding line must contain
  pub guard: String,
  /// Replacement, may span several lines
  pub block: String,
}

impl InsertionRule {
  pub fn new(trigger: impl Into<String>, guard: impl Into<String>, block: impl Into<String>) -> Self {
    Self {
      trigger: trigger.into(),
      guard: guard.into(),
      block: block.into(),
    }
  }

  pub fn validate(&self) -> Result<(), String> {
    if self.trigger.is_empty() {
      return Err("trigger must not be empty".to_string());
    }
    if self.guard.is_empty() {
      return Err("guard must not be empty".to_string());
    }
    Ok(())
  }

  /// Index of the first line matching this rule
  ///
  /// Line 0 has no predecessor and never matches.
  pub fn find<S: AsRef<str>>(&self, lines: &[S]) -> Option<usize> {
    lines
      .windows(2)
      .position(|pair| pair[1].as_ref().contains(self.trigger.as_str()) && pair[0].as_ref().contains(self.guard.as_str()))
      .map(|i| i + 1)
  }
}

/// Outcome of a guarded insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
  /// The line at `line` (zero-based) was replaced
  Inserted { line: usize, content: String },
  NotFound,
}

/// Replace the first guarded trigger line in `content` with the block
pub fn insert_block(content: &str, rule: &InsertionRule) -> InsertOutcome {
  let mut lines: Vec<&str> = content.split('\n').collect();

  match rule.find(&lines) {
    Some(line) => {
      lines[line] = rule.block.as_str();
      InsertOutcome::Inserted {
        line,
        content: lines.join("\n"),
      }
    }
    None => InsertOutcome::NotFound,
  }
}

/// Read `path`, replace the first guarded trigger line, write the result back
///
/// On a miss the line index is `None` and the file is not written. With
/// `require_match`, a miss is `PatchError::NoMatch` instead.
pub fn apply_insertion(path: &Path, rule: &InsertionRule, opts: ApplyOptions) -> PatchResult<(FilePatch, Option<usize>)> {
  let before = target::read(path)?;

  let (line, after) = match insert_block(&before, rule) {
    InsertOutcome::Inserted { line, content } => (line, content),
    InsertOutcome::NotFound if opts.require_match => {
      return Err(PatchError::NoMatch {
        path: path.to_path_buf(),
        detail: format!(
          "no line containing {:?} directly after a line containing {:?}",
          rule.trigger, rule.guard
        ),
      });
    }
    InsertOutcome::NotFound => {
      let after = before.clone();
      return Ok((
        FilePatch {
          path: path.to_path_buf(),
          before,
          after,
          written: false,
        },
        None,
      ));
    }
  };

  let written = !opts.dry_run;
  if written {
    target::write(path, &after)?;
  }

  Ok((
    FilePatch {
      path: path.to_path_buf(),
      before,
      after,
      written,
    },
    Some(line),
  ))
}
