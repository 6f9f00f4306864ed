//! Core engine for textpatch
//!
//! - **config**: patch.toml parsing and validation
//! - **error**: error types with contextual help messages and exit codes
//! - **executor**: runs a plan step by step
//! - **insert**: guarded line replacement
//! - **plan**: plans, step outcomes and reports
//! - **recipes**: built-in recipes and name lookup
//! - **substitute**: literal substring replacement
//! - **target**: scoped read/write of target files

pub mod config;
pub mod error;
pub mod executor;
pub mod insert;
pub mod plan;
pub mod recipes;
pub mod substitute;
pub mod target;
