//! Built-in recipes and recipe lookup
//!
//! Two recipes ship with the binary. They patch a web front-end so the history
//! page tolerates a missing token when mock data is on, and so leaving
//! onboarding routes an anonymous user to the login screen instead of home.
//! A recipe in patch.toml with the same name replaces the built-in one.

use crate::core::config::{PatchConfig, RecipeConfig};
use crate::core::error::{ConfigError, PatchError, PatchResult};
use crate::core::insert::InsertionRule;
use crate::core::substitute::ReplacementRule;
use serde::Serialize;
use std::path::PathBuf;

pub const HISTORY_PAGE: &str = "history-page";
pub const APP_ROOT: &str = "app-root";

const APP_ROOT_BLOCK: &str =
  "    if (!userToken) {\n      setAppState(AppState.LOGIN);\n    } else {\n      setAppState(AppState.HOME);\n    }";

/// Recipes compiled into the binary
pub fn builtin() -> Vec<RecipeConfig> {
  vec![
    RecipeConfig {
      name: HISTORY_PAGE.to_string(),
      file: PathBuf::from("src/pages/HistoryPage.tsx"),
      description: Some("Skip the token check when mock data is enabled".to_string()),
      require_match: false,
      replace: vec![
        ReplacementRule::new(
          r#"if (!token) throw new Error("No token found");"#,
          r#"if (!useMockData && !token) throw new Error("No token found");"#,
        ),
        ReplacementRule::new("encodeURIComponent(token)", r#"encodeURIComponent(token || "")"#),
      ],
      insert: None,
    },
    RecipeConfig {
      name: APP_ROOT.to_string(),
      file: PathBuf::from("App.tsx"),
      description: Some("Send users without a token to login after onboarding".to_string()),
      require_match: false,
      replace: Vec::new(),
      insert: Some(InsertionRule::new(
        "setAppState(AppState.HOME);",
        "setIsOnboarding(false);",
        APP_ROOT_BLOCK,
      )),
    },
  ]
}

/// Where a recipe was defined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeSource {
  Builtin,
  Config,
}

/// Configured recipes layered over the built-in ones
#[derive(Debug, Clone)]
pub struct RecipeBook {
  recipes: Vec<(RecipeConfig, RecipeSource)>,
}

impl RecipeBook {
  /// Built-ins first (unless overridden), then config recipes in file order
  pub fn new(config: &PatchConfig) -> Self {
    let mut recipes: Vec<(RecipeConfig, RecipeSource)> = builtin()
      .into_iter()
      .filter(|b| !config.recipes.iter().any(|r| r.name == b.name))
      .map(|r| (r, RecipeSource::Builtin))
      .collect();
    recipes.extend(config.recipes.iter().cloned().map(|r| (r, RecipeSource::Config)));
    Self { recipes }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&RecipeConfig, RecipeSource)> {
    self.recipes.iter().map(|(r, s)| (r, *s))
  }

  pub fn get(&self, name: &str) -> Option<&RecipeConfig> {
    self.recipes.iter().find(|(r, _)| r.name == name).map(|(r, _)| r)
  }

  /// Resolve names in the order given; fails on the first unknown name
  pub fn select(&self, names: &[String]) -> PatchResult<Vec<&RecipeConfig>> {
    names
      .iter()
      .map(|name| {
        self.get(name).ok_or_else(|| {
          PatchError::Config(ConfigError::RecipeNotFound { name: name.clone() })
        })
      })
      .collect()
  }

  pub fn all(&self) -> Vec<&RecipeConfig> {
    self.recipes.iter().map(|(r, _)| r).collect()
  }
}
