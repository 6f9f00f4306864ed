use crate::core::config::PatchConfig;
use crate::core::error::PatchResult;
use crate::core::recipes::{RecipeBook, RecipeSource};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One row of `textpatch list`
#[derive(Debug, Clone, Serialize)]
pub struct RecipeSummary {
  pub name: String,
  pub kind: &'static str,
  pub file: PathBuf,
  pub source: RecipeSource,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub require_match: bool,
}

/// Summarize every recipe available under `root`
pub fn summarize(root: &Path) -> PatchResult<Vec<RecipeSummary>> {
  let config = PatchConfig::load_optional(root)?;
  let book = RecipeBook::new(&config);

  Ok(
    book
      .iter()
      .map(|(recipe, source)| RecipeSummary {
        name: recipe.name.clone(),
        kind: recipe.kind_label(),
        file: recipe.file.clone(),
        source,
        description: recipe.description.clone(),
        require_match: recipe.require_match,
      })
      .collect(),
  )
}

/// Run the list command
pub fn run_list(root: &Path, json: bool) -> PatchResult<()> {
  let summaries = summarize(root)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&summaries)?);
    return Ok(());
  }

  println!("📦 Recipes ({}):\n", summaries.len());
  for s in &summaries {
    let source = match s.source {
      RecipeSource::Builtin => "built-in",
      RecipeSource::Config => "patch.toml",
    };
    println!("   {} [{}] → {} ({})", s.name, s.kind, s.file.display(), source);
    if let Some(desc) = &s.description {
      println!("      {}", desc);
    }
  }

  Ok(())
}
