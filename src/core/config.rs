use crate::core::error::{ConfigError, FileAccessError, FileOp, PatchError, PatchResult, ResultExt};
use crate::core::insert::InsertionRule;
use crate::core::substitute::ReplacementRule;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for textpatch
/// Searched in order: patch.toml, .patch.toml, .config/patch.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchConfig {
  #[serde(default)]
  pub recipes: Vec<RecipeConfig>,
}

/// A named patch against one target file
///
/// # Example
///
/// ```toml
/// [[recipes]]
/// name = "history-page"
/// file = "src/pages/HistoryPage.tsx"
///
/// [[recipes.replace]]
/// search = 'encodeURIComponent(token)'
/// replace = 'encodeURIComponent(token || "")'
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeConfig {
  /// Unique name used by `textpatch apply <name>`
  pub name: String,

  /// Target file, relative to the root unless absolute
  pub file: PathBuf,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,

  /// Treat a miss as an error instead of a no-op
  #[serde(default)]
  pub require_match: bool,

  /// Literal substitutions, applied in order
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub replace: Vec<ReplacementRule>,

  /// Guarded line replacement
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub insert: Option<InsertionRule>,
}

/// The patch a recipe performs, once validated
#[derive(Debug, Clone, Copy)]
pub enum RecipeKind<'a> {
  Substitute(&'a [ReplacementRule]),
  Insert(&'a InsertionRule),
}

impl RecipeConfig {
  /// Validate the recipe: exactly one of `replace` or `insert`, no empty literals
  pub fn validate(&self) -> PatchResult<()> {
    let invalid = |reason: String| {
      PatchError::Config(ConfigError::InvalidRecipe {
        name: self.name.clone(),
        reason,
      })
    };

    if self.name.trim().is_empty() {
      return Err(invalid("name must not be empty".to_string()));
    }
    if self.file.as_os_str().is_empty() {
      return Err(invalid("file must not be empty".to_string()));
    }

    match (self.replace.is_empty(), &self.insert) {
      (true, None) => return Err(invalid("needs either [[recipes.replace]] rules or a [recipes.insert] table".to_string())),
      (false, Some(_)) => return Err(invalid("cannot combine replace rules with an insert".to_string())),
      _ => {}
    }

    for (i, rule) in self.replace.iter().enumerate() {
      rule.validate().map_err(|e| invalid(format!("replace rule {}: {}", i + 1, e)))?;
    }
    if let Some(rule) = &self.insert {
      rule.validate().map_err(|e| invalid(format!("insert: {}", e)))?;
    }

    Ok(())
  }

  /// What this recipe does; only meaningful after `validate`
  pub fn kind(&self) -> RecipeKind<'_> {
    match &self.insert {
      Some(rule) => RecipeKind::Insert(rule),
      None => RecipeKind::Substitute(&self.replace),
    }
  }

  pub fn kind_label(&self) -> &'static str {
    match self.kind() {
      RecipeKind::Substitute(_) => "substitute",
      RecipeKind::Insert(_) => "insert",
    }
  }
}

impl PatchConfig {
  /// Find config file in search order: patch.toml, .patch.toml, .config/patch.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("patch.toml"),
      path.join(".patch.toml"),
      path.join(".config").join("patch.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from patch.toml (searches multiple locations)
  pub fn load(path: &Path) -> PatchResult<Self> {
    let config_path = Self::find_config_path(path).ok_or_else(|| {
      PatchError::Config(ConfigError::NotFound {
        root: path.to_path_buf(),
      })
    })?;

    let content =
      fs::read_to_string(&config_path).map_err(|e| FileAccessError::new(&config_path, FileOp::Read, e))?;
    let config = Self::parse(&content).with_context(|| format!("Invalid config in {}", config_path.display()))?;

    Ok(config)
  }

  /// Load config if present; a missing file is an empty config
  pub fn load_optional(path: &Path) -> PatchResult<Self> {
    if Self::exists(path) {
      Self::load(path)
    } else {
      Ok(Self::default())
    }
  }

  /// Parse and validate config text
  pub fn parse(content: &str) -> PatchResult<Self> {
    let config: PatchConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Validate every recipe and reject duplicate names
  pub fn validate(&self) -> PatchResult<()> {
    let mut seen = HashSet::new();
    for recipe in &self.recipes {
      recipe.validate()?;
      if !seen.insert(recipe.name.as_str()) {
        return Err(PatchError::Config(ConfigError::InvalidRecipe {
          name: recipe.name.clone(),
          reason: "defined more than once".to_string(),
        }));
      }
    }
    Ok(())
  }

  /// Save config to patch.toml (default location)
  pub fn save(&self, path: &Path) -> PatchResult<PathBuf> {
    let config_path = path.join("patch.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).map_err(|e| FileAccessError::new(&config_path, FileOp::Write, e))?;
    Ok(config_path)
  }

  /// Check if config exists at the given path
  pub fn exists(path: &Path) -> bool {
    Self::find_config_path(path).is_some()
  }
}
