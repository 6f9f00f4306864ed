//! Integration tests for textpatch

mod helpers;
mod test_apply;
mod test_init;
mod test_substitute;
