//! Target file access
//!
//! One scoped read of the whole file, then at most one scoped write of the whole
//! file. No backups, no temp-file swap: a crash mid-write can leave the target
//! truncated.

use crate::core::error::{FileAccessError, FileOp, PatchResult};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Options shared by the patch primitives
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
  /// Compute the result without writing
  pub dry_run: bool,
  /// Escalate a miss to `PatchError::NoMatch`
  pub require_match: bool,
}

/// What happened to a file
#[derive(Debug, Clone)]
pub struct FilePatch {
  pub path: PathBuf,
  pub before: String,
  pub after: String,
  pub written: bool,
}

/// Resolve a target path against the base directory
///
/// Absolute paths are returned as-is.
pub fn resolve(root: &Path, file: &Path) -> PathBuf {
  if file.is_absolute() {
    file.to_path_buf()
  } else {
    root.join(file)
  }
}

/// Read the full content of a target file as UTF-8
pub fn read(path: &Path) -> PatchResult<String> {
  fs::read_to_string(path).map_err(|e| FileAccessError::new(path, FileOp::Read, e).into())
}

/// Overwrite a target file with new content
pub fn write(path: &Path, content: &str) -> PatchResult<()> {
  fs::write(path, content).map_err(|e| FileAccessError::new(path, FileOp::Write, e).into())
}

/// SHA-256 of the content, hex encoded
pub fn digest(content: &str) -> String {
  let mut hasher = Sha256::new();
  hasher.update(content.as_bytes());
  format!("{:x}", hasher.finalize())
}
