//! Tests for the `init` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_init_creates_config() -> Result<()> {
  let project = TestProject::new()?;

  run_textpatch(&project.path, &["init"])?;

  assert!(project.file_exists("patch.toml"));
  let config = project.read_file("patch.toml")?;
  assert!(config.contains("[[recipes]]"));
  assert!(config.contains("history-page"));
  assert!(config.contains("app-root"));

  // the written config drives apply just like the built-ins
  run_textpatch(&project.path, &["apply", "--all"])?;
  assert!(project.read_file("App.tsx")?.contains("AppState.LOGIN"));

  Ok(())
}

#[test]
fn test_init_refuses_existing_config() -> Result<()> {
  let project = TestProject::new()?;
  run_textpatch(&project.path, &["init"])?;

  let output = textpatch(&project.path, &["init"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("already exists"));

  run_textpatch(&project.path, &["init", "--force"])?;

  Ok(())
}

#[test]
fn test_invalid_config_is_reported() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("patch.toml", "[[recipes]]\nname = \"broken\"\nfile = \"App.tsx\"\n")?;

  let output = textpatch(&project.path, &["list"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Invalid recipe 'broken'"));

  Ok(())
}
