//! Error types for textpatch with contextual messages and exit codes
//!
//! Every error maps to an exit code. Errors that the user can fix on their own
//! carry a help line that `print_error` renders below the message.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for textpatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, unknown recipe, strict miss)
  User = 1,
  /// System error (file access, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for textpatch
#[derive(Debug)]
pub enum PatchError {
  /// Configuration errors
  Config(ConfigError),

  /// Target file could not be read or written
  FileAccess(FileAccessError),

  /// A rule found nothing to patch and a match was required
  NoMatch { path: PathBuf, detail: String },

  /// I/O errors outside of target access
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl PatchError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    PatchError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    PatchError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      PatchError::Message { message, context, help } => PatchError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      PatchError::Config(_) => ExitCode::User,
      PatchError::FileAccess(_) => ExitCode::System,
      PatchError::NoMatch { .. } => ExitCode::User,
      PatchError::Io(_) => ExitCode::System,
      PatchError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      PatchError::Config(e) => e.help_message(),
      PatchError::FileAccess(e) => e.help_message(),
      PatchError::NoMatch { .. } => {
        Some("Run without --strict to treat a miss as a no-op, or check the search literals.".to_string())
      }
      PatchError::Message { help, .. } => help.clone(),
      PatchError::Io(_) => None,
    }
  }
}

impl fmt::Display for PatchError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PatchError::Config(e) => write!(f, "{}", e),
      PatchError::FileAccess(e) => write!(f, "{}", e),
      PatchError::NoMatch { path, detail } => write!(f, "No match in {}: {}", path.display(), detail),
      PatchError::Io(e) => write!(f, "I/O error: {}", e),
      PatchError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for PatchError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      PatchError::Io(e) => Some(e),
      PatchError::FileAccess(e) => Some(&e.source),
      _ => None,
    }
  }
}

impl From<io::Error> for PatchError {
  fn from(err: io::Error) -> Self {
    PatchError::Io(err)
  }
}

impl From<String> for PatchError {
  fn from(msg: String) -> Self {
    PatchError::message(msg)
  }
}

impl From<&str> for PatchError {
  fn from(msg: &str) -> Self {
    PatchError::message(msg)
  }
}

impl From<toml_edit::de::Error> for PatchError {
  fn from(err: toml_edit::de::Error) -> Self {
    PatchError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for PatchError {
  fn from(err: toml_edit::ser::Error) -> Self {
    PatchError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for PatchError {
  fn from(err: serde_json::Error) -> Self {
    PatchError::message(format!("JSON error: {}", err))
  }
}

impl From<ConfigError> for PatchError {
  fn from(err: ConfigError) -> Self {
    PatchError::Config(err)
  }
}

impl From<FileAccessError> for PatchError {
  fn from(err: FileAccessError) -> Self {
    PatchError::FileAccess(err)
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// patch.toml not found
  NotFound { root: PathBuf },

  /// patch.toml already exists (init without --force)
  AlreadyExists { path: PathBuf },

  /// Recipe not found among configured and built-in recipes
  RecipeNotFound { name: String },

  /// Recipe failed validation
  InvalidRecipe { name: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Run `textpatch init` to create a configuration file.".to_string()),
      ConfigError::AlreadyExists { .. } => Some("Pass --force to overwrite it.".to_string()),
      ConfigError::RecipeNotFound { .. } => Some("Available recipes can be listed with `textpatch list`.".to_string()),
      ConfigError::InvalidRecipe { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { root } => {
        write!(
          f,
          "No textpatch configuration found.\nExpected file: {}/patch.toml",
          root.display()
        )
      }
      ConfigError::AlreadyExists { path } => {
        write!(f, "Configuration already exists: {}", path.display())
      }
      ConfigError::RecipeNotFound { name } => {
        write!(f, "Recipe '{}' not found", name)
      }
      ConfigError::InvalidRecipe { name, reason } => {
        write!(f, "Invalid recipe '{}': {}", name, reason)
      }
    }
  }
}

/// Which side of the read/write cycle failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
  Read,
  Write,
}

impl fmt::Display for FileOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FileOp::Read => write!(f, "read"),
      FileOp::Write => write!(f, "write"),
    }
  }
}

/// Target file access failure
#[derive(Debug)]
pub struct FileAccessError {
  pub path: PathBuf,
  pub op: FileOp,
  pub source: io::Error,
}

impl FileAccessError {
  pub fn new(path: impl Into<PathBuf>, op: FileOp, source: io::Error) -> Self {
    Self {
      path: path.into(),
      op,
      source,
    }
  }

  fn help_message(&self) -> Option<String> {
    match self.source.kind() {
      io::ErrorKind::NotFound => Some("Check the target path, or pass --root to change the base directory.".to_string()),
      io::ErrorKind::PermissionDenied => Some(format!("Check the permissions of {}", self.path.display())),
      io::ErrorKind::InvalidData => Some("Only UTF-8 text files can be patched.".to_string()),
      _ => None,
    }
  }
}

impl fmt::Display for FileAccessError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Failed to {} {}: {}", self.op, self.path.display(), self.source)
  }
}

/// Result type alias for textpatch
pub type PatchResult<T> = Result<T, PatchError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> PatchResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> PatchResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<PatchError>,
{
  fn context(self, ctx: impl Into<String>) -> PatchResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> PatchResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &PatchError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
