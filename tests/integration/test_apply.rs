//! Tests for the `apply` and `list` commands

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_apply_all_builtins() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_textpatch(&project.path, &["apply", "--all"])?;

  let page = project.read_file("src/pages/HistoryPage.tsx")?;
  assert!(page.contains("if (!useMockData && !token)"));
  let app = project.read_file("App.tsx")?;
  assert!(app.contains("setAppState(AppState.LOGIN);"));
  assert!(stdout(&output).contains("2/2 recipe(s) matched, 2 file(s) changed"));

  Ok(())
}

#[test]
fn test_apply_twice_changes_nothing() -> Result<()> {
  let project = TestProject::new()?;
  run_textpatch(&project.path, &["apply", "--all"])?;
  let page = project.read_file("src/pages/HistoryPage.tsx")?;
  let app = project.read_file("App.tsx")?;

  let output = run_textpatch(&project.path, &["apply", "--all", "--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(report["steps"][0]["changed"], false);
  assert_eq!(report["steps"][1]["outcome"]["kind"], "not_found");
  assert_eq!(project.read_file("src/pages/HistoryPage.tsx")?, page);
  assert_eq!(project.read_file("App.tsx")?, app);

  Ok(())
}

#[test]
fn test_apply_named_recipe_only() -> Result<()> {
  let project = TestProject::new()?;

  run_textpatch(&project.path, &["apply", "app-root"])?;

  assert_eq!(project.read_file("src/pages/HistoryPage.tsx")?, HISTORY_PAGE);
  assert_ne!(project.read_file("App.tsx")?, APP);

  Ok(())
}

#[test]
fn test_apply_dry_run_shows_plan() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_textpatch(&project.path, &["apply", "--all", "--dry-run"])?;

  let out = stdout(&output);
  assert!(out.contains("Plan:"), "{}", out);
  assert!(out.contains("Would patch"), "{}", out);
  assert_eq!(project.read_file("App.tsx")?, APP);
  assert_eq!(project.read_file("src/pages/HistoryPage.tsx")?, HISTORY_PAGE);

  Ok(())
}

#[test]
fn test_apply_unknown_recipe() -> Result<()> {
  let project = TestProject::new()?;

  let output = textpatch(&project.path, &["apply", "nope"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Recipe 'nope' not found"));

  Ok(())
}

#[test]
fn test_apply_missing_target_file() -> Result<()> {
  let project = TestProject::empty()?;

  let output = textpatch(&project.path, &["apply", "history-page"])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("HistoryPage.tsx"));

  Ok(())
}

#[test]
fn test_apply_config_recipe_with_root() -> Result<()> {
  let project = TestProject::empty()?;
  project.write_file("web/lib.ts", "const a = oldName();\nconst b = oldName();\n")?;
  project.write_file(
    "web/patch.toml",
    r#"
[[recipes]]
name = "rename"
file = "lib.ts"

[[recipes.replace]]
search = "oldName"
replace = "newName"
"#,
  )?;

  let root = project.path.join("web");
  run_textpatch(&project.path, &["--root", root.to_str().unwrap(), "apply", "rename"])?;

  assert_eq!(
    project.read_file("web/lib.ts")?,
    "const a = newName();\nconst b = newName();\n"
  );

  Ok(())
}

#[test]
fn test_list_json() -> Result<()> {
  let project = TestProject::empty()?;

  let output = run_textpatch(&project.path, &["list", "--json"])?;
  let list: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(list[0]["name"], "history-page");
  assert_eq!(list[0]["source"], "builtin");
  assert_eq!(list[1]["name"], "app-root");
  assert_eq!(list[1]["kind"], "insert");

  Ok(())
}

#[test]
fn test_apply_unknown_flag_is_user_error() -> Result<()> {
  let project = TestProject::new()?;

  let output = textpatch(&project.path, &["apply", "--bogus"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("--bogus"));
  assert_eq!(project.read_file("App.tsx")?, APP);

  Ok(())
}
