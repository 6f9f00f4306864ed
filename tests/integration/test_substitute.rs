//! Tests for the `substitute` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_substitute_relaxes_token_guard() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_textpatch(
    &project.path,
    &[
      "substitute",
      "src/pages/HistoryPage.tsx",
      "--search",
      r#"if (!token) throw new Error("No token found");"#,
      "--replace",
      r#"if (!useMockData && !token) throw new Error("No token found");"#,
      "--search",
      "encodeURIComponent(token)",
      "--replace",
      r#"encodeURIComponent(token || "")"#,
    ],
  )?;

  let page = project.read_file("src/pages/HistoryPage.tsx")?;
  assert!(page.contains(r#"    if (!useMockData && !token) throw new Error("No token found");"#));
  assert!(page.contains(r#"${encodeURIComponent(token || "")}"#));
  assert!(stdout(&output).contains("Patched"));

  Ok(())
}

#[test]
fn test_substitute_absent_literal_keeps_bytes() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_textpatch(
    &project.path,
    &["substitute", "App.tsx", "--search", "doesNotExist()", "--replace", "x()"],
  )?;

  assert_eq!(project.read_file("App.tsx")?, APP);
  assert!(stdout(&output).contains("1 rule(s) found nothing"));

  Ok(())
}

#[test]
fn test_substitute_strict_miss_fails() -> Result<()> {
  let project = TestProject::new()?;

  let output = textpatch(
    &project.path,
    &["substitute", "App.tsx", "--search", "doesNotExist()", "--replace", "x()", "--strict"],
  )?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("No match in"));
  assert_eq!(project.read_file("App.tsx")?, APP);

  Ok(())
}

#[test]
fn test_substitute_missing_file_exits_with_system_error() -> Result<()> {
  let project = TestProject::empty()?;

  let output = textpatch(&project.path, &["substitute", "nope.tsx", "--search", "a", "--replace", "b"])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("Failed to read"));
  assert!(!project.file_exists("nope.tsx"));

  Ok(())
}

#[test]
fn test_substitute_mismatched_pairs() -> Result<()> {
  let project = TestProject::new()?;

  let output = textpatch(
    &project.path,
    &["substitute", "App.tsx", "--search", "a", "--search", "b", "--replace", "c"],
  )?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("--replace"));

  Ok(())
}

#[test]
fn test_substitute_dry_run_json() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_textpatch(
    &project.path,
    &[
      "substitute",
      "src/pages/HistoryPage.tsx",
      "--search",
      "encodeURIComponent(token)",
      "--replace",
      "encodeURIComponent(token ?? \"\")",
      "--dry-run",
      "--json",
    ],
  )?;

  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(report["dry_run"], true);
  assert_eq!(report["steps"][0]["changed"], true);
  assert_eq!(report["steps"][0]["written"], false);
  assert_eq!(report["steps"][0]["outcome"]["kind"], "substitute");
  assert_eq!(report["steps"][0]["outcome"]["rules"][0]["occurrences"], 1);
  assert_eq!(project.read_file("src/pages/HistoryPage.tsx")?, HISTORY_PAGE);

  Ok(())
}

#[test]
fn test_substitute_non_utf8_exits_with_system_error() -> Result<()> {
  let project = TestProject::empty()?;
  std::fs::write(project.path.join("binary.tsx"), [0xff, 0xfe, b'a'])?;

  let output = textpatch(&project.path, &["substitute", "binary.tsx", "--search", "a", "--replace", "b"])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("Failed to read"));
  assert!(stderr(&output).contains("Only UTF-8 text files can be patched."));
  assert_eq!(std::fs::read(project.path.join("binary.tsx"))?, vec![0xff, 0xfe, b'a']);

  Ok(())
}

#[test]
fn test_substitute_missing_replace_is_user_error() -> Result<()> {
  let project = TestProject::new()?;

  let output = textpatch(&project.path, &["substitute", "App.tsx", "--search", "a"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("--replace"));
  assert_eq!(project.read_file("App.tsx")?, APP);

  Ok(())
}

#[test]
fn test_help_still_succeeds() -> Result<()> {
  let project = TestProject::empty()?;

  let output = run_textpatch(&project.path, &["substitute", "--help"])?;
  assert!(stdout(&output).contains("--search"));

  Ok(())
}
