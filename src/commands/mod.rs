//! CLI commands for textpatch
//!
//! - **substitute**: literal replacements in one file
//! - **insert**: guarded line replacement in one file
//! - **apply**: run named recipes (built-in or from patch.toml)
//! - **list**: show available recipes
//! - **init**: write a patch.toml seeded with the built-in recipes
//!
//! The patching commands build a plan and hand it to `report::run_plan`.

pub mod apply;
pub mod init;
pub mod insert;
pub mod list;
pub mod report;
pub mod substitute;

pub use apply::run_apply;
pub use init::run_init;
pub use insert::{BlockSource, run_insert};
pub use list::run_list;
pub use substitute::run_substitute;
