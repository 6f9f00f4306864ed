mod commands;
mod core;
mod ui;

use clap::{Args, Parser, Subcommand};
use commands::BlockSource;
use crate::core::error::{ExitCode, PatchError, print_error};
use std::path::PathBuf;

/// Apply literal, reviewable text patches to source files
#[derive(Parser)]
#[command(name = "textpatch")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Base directory for relative target paths and patch.toml (default: current directory)
  #[arg(long, global = true)]
  root: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

/// Flags shared by every patching command
#[derive(Args, Clone, Copy)]
struct PatchFlags {
  /// Show the plan and the outcome without writing any file
  #[arg(long)]
  dry_run: bool,
  /// Output the report in JSON format
  #[arg(long)]
  json: bool,
  /// Fail when a rule finds nothing to patch
  #[arg(long)]
  strict: bool,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Ad-hoc patches
  // ============================================================================
  /// Replace every occurrence of literal strings in a file
  Substitute {
    /// File to patch
    file: PathBuf,
    /// Literal to search for (repeatable, paired with --replace in order)
    #[arg(long = "search", required = true, allow_hyphen_values = true)]
    searches: Vec<String>,
    /// Replacement literal (repeatable)
    #[arg(long = "replace", required = true, allow_hyphen_values = true)]
    replaces: Vec<String>,
    #[command(flatten)]
    flags: PatchFlags,
  },

  /// Replace the first trigger line that directly follows a guard line
  Insert {
    /// File to patch
    file: PathBuf,
    /// Text identifying the line to replace
    #[arg(long, allow_hyphen_values = true)]
    trigger: String,
    /// Text the preceding line must contain
    #[arg(long, allow_hyphen_values = true)]
    guard: String,
    /// Replacement block
    #[arg(long, conflicts_with = "block_file", required_unless_present = "block_file", allow_hyphen_values = true)]
    block: Option<String>,
    /// Read the replacement block from a file
    #[arg(long)]
    block_file: Option<PathBuf>,
    #[command(flatten)]
    flags: PatchFlags,
  },

  // ============================================================================
  // Recipes
  // ============================================================================
  /// Apply named recipes from patch.toml and the built-in set
  Apply {
    /// Recipes to apply, in order
    recipes: Vec<String>,
    /// Apply every available recipe
    #[arg(short, long)]
    all: bool,
    #[command(flatten)]
    flags: PatchFlags,
  },

  /// List available recipes
  List {
    /// Output the list in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Create patch.toml with the built-in recipes
  Init {
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    // --help and --version go to stdout and exit 0
    Err(e) if !e.use_stderr() => e.exit(),
    Err(e) => {
      let _ = e.print();
      std::process::exit(ExitCode::User.as_i32());
    }
  };

  let root = match cli.root {
    Some(root) => root,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => {
        eprintln!("Error: Failed to get current directory: {}", e);
        std::process::exit(1);
      }
    },
  };

  let result = match cli.command {
    Commands::Substitute {
      file,
      searches,
      replaces,
      flags,
    } => commands::run_substitute(&root, file, searches, replaces, flags.dry_run, flags.json, flags.strict),
    Commands::Insert {
      file,
      trigger,
      guard,
      block,
      block_file,
      flags,
    } => {
      let block = match (block, block_file) {
        (Some(text), _) => BlockSource::Inline(text),
        (None, Some(path)) => BlockSource::File(path),
        (None, None) => handle_error(PatchError::message("Either --block or --block-file is required")),
      };
      commands::run_insert(&root, file, trigger, guard, block, flags.dry_run, flags.json, flags.strict)
    }
    Commands::Apply { recipes, all, flags } => {
      commands::run_apply(&root, recipes, all, flags.dry_run, flags.json, flags.strict)
    }
    Commands::List { json } => commands::run_list(&root, json),
    Commands::Init { force } => commands::run_init(&root, force),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: PatchError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
