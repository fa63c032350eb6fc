//! Service layer.

pub mod purge;

pub use purge::{load_rule_file, PurgeError, PurgeRunner, RunFailure};
