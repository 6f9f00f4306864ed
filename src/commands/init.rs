use crate::core::config::PatchConfig;
use crate::core::error::{ConfigError, PatchError, PatchResult};
use crate::core::recipes;
use std::path::{Path, PathBuf};

/// Write patch.toml seeded with the built-in recipes
///
/// An existing config (in any of the searched locations) is kept unless
/// `force` is set; with `force`, patch.toml at the root is overwritten.
pub fn write_initial_config(root: &Path, force: bool) -> PatchResult<PathBuf> {
  if !force && let Some(existing) = PatchConfig::find_config_path(root) {
    return Err(PatchError::Config(ConfigError::AlreadyExists { path: existing }));
  }

  let config = PatchConfig {
    recipes: recipes::builtin(),
  };
  config.save(root)
}

/// Run the init command
pub fn run_init(root: &Path, force: bool) -> PatchResult<()> {
  let path = write_initial_config(root, force)?;
  println!("✅ Created {}", path.display());
  println!("   Edit the recipes, then run `textpatch apply --all --dry-run` to preview them.");
  Ok(())
}
