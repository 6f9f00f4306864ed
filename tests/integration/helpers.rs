//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const HISTORY_PAGE: &str = r#"export const HistoryPage = () => {
  const load = async () => {
    const token = localStorage.getItem("token");
    if (!token) throw new Error("No token found");
    const res = await fetch(`/api/history?token=${encodeURIComponent(token)}`);
    return res.json();
  };
};
"#;

pub const APP: &str = r#"const App = () => {
  const finishOnboarding = () => {
  setIsOnboarding(false);
    setAppState(AppState.HOME);
  };
};
"#;

/// A scratch front-end project
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Empty project directory
  pub fn empty() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Project containing the two files the built-in recipes target
  pub fn new() -> Result<Self> {
    let project = Self::empty()?;
    project.write_file("src/pages/HistoryPage.tsx", HISTORY_PAGE)?;
    project.write_file("App.tsx", APP)?;
    Ok(project)
  }

  /// Write a file, creating parent directories
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let full = self.path.join(path);
    if let Some(parent) = full.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(full, content)?;
    Ok(())
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }
}

/// Run textpatch and return its output whatever the exit status
pub fn textpatch(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_textpatch");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run textpatch")
}

/// Run textpatch and require success
pub fn run_textpatch(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = textpatch(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "textpatch command failed: textpatch {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
