//! Domain models.

mod purge;

pub use purge::{
    GroupReport, GroupSpec, MatchRule, PurgeGroup, RuleCount, RuleFileSpec, RuleSpec, RunReport,
};
