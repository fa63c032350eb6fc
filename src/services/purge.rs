//! The purge runner: applies match rules to the URL store and deletes
//! never-crawled URLs whose URL matches.
//!
//! Execution is fully sequential and non-transactional: rules run in
//! declared order, each deletion is permanent, and a failure partway
//! through leaves earlier deletions in place (there is no rollback).

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{GroupReport, MatchRule, PurgeGroup, RuleCount, RuleFileSpec, RunReport};
use crate::repository::{DbError, UrlRepository};

#[derive(Debug, Error)]
pub enum PurgeError {
    /// The underlying store cannot be reached or a query failed.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[from] DbError),

    /// A rule's pattern does not compile as a match expression.
    #[error("rule '{rule}': cannot compile pattern: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    /// The rule file cannot be read.
    #[error("cannot read rule file {path}: {source}")]
    RuleFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rule file is not valid TOML for the expected shape.
    #[error("malformed rule file: {0}")]
    MalformedRules(#[from] toml::de::Error),
}

/// A run that stopped partway. Earlier deletions stay deleted; `partial`
/// holds the report built before the failure so the caller can still emit
/// the lines that were already produced.
#[derive(Debug)]
pub struct RunFailure {
    pub partial: RunReport,
    pub error: PurgeError,
}

/// Applies match rules to the URL store and accumulates a run report.
pub struct PurgeRunner<'a> {
    repo: &'a UrlRepository,
    dry_run: bool,
}

impl<'a> PurgeRunner<'a> {
    pub fn new(repo: &'a UrlRepository) -> Self {
        Self {
            repo,
            dry_run: false,
        }
    }

    /// A runner that counts matches but never deletes.
    pub fn dry_run(repo: &'a UrlRepository) -> Self {
        Self {
            repo,
            dry_run: true,
        }
    }

    /// Apply one rule: select never-crawled URLs matching the rule's
    /// pattern, delete them, and return the count.
    ///
    /// Candidates are re-queried for every rule, so a record matching
    /// several rules is counted by whichever rule deletes it first and by
    /// no later rule.
    pub async fn apply_rule(&self, rule: &MatchRule) -> Result<u64, PurgeError> {
        let candidates = self.repo.never_crawled().await?;

        let matched: Vec<i32> = candidates
            .iter()
            .filter(|entry| rule.is_match(&entry.url))
            .map(|entry| entry.id)
            .collect();

        debug!(
            rule = rule.name(),
            pattern = rule.pattern(),
            matched = matched.len(),
            "evaluated purge rule"
        );

        if self.dry_run {
            return Ok(matched.len() as u64);
        }

        let deleted = self.repo.delete_by_ids(&matched).await?;
        info!(
            rule = rule.name(),
            deleted, "removed never-crawled URLs matching rule"
        );

        Ok(deleted as u64)
    }

    /// Apply every group's rules in declared order.
    ///
    /// On failure the report built so far is handed back alongside the
    /// error; deletions made by earlier rules are not undone.
    pub async fn run(&self, groups: &[PurgeGroup]) -> Result<RunReport, RunFailure> {
        let mut report = RunReport::default();

        for group in groups {
            let mut group_report = GroupReport {
                label: group.label.clone(),
                rules: Vec::new(),
            };

            for rule in &group.rules {
                match self.apply_rule(rule).await {
                    Ok(deleted) => group_report.rules.push(RuleCount {
                        rule: rule.name().to_string(),
                        pattern: rule.pattern().to_string(),
                        deleted,
                    }),
                    Err(error) => {
                        report.groups.push(group_report);
                        return Err(RunFailure {
                            partial: report,
                            error,
                        });
                    }
                }
            }

            report.groups.push(group_report);
        }

        Ok(report)
    }
}

/// Load purge groups from a TOML rule file, compiling every pattern.
///
/// Strict policy: the first invalid pattern fails the whole load, before
/// anything touches the store.
pub fn load_rule_file(path: &Path) -> Result<Vec<PurgeGroup>, PurgeError> {
    let text = fs::read_to_string(path).map_err(|source| PurgeError::RuleFile {
        path: path.to_path_buf(),
        source,
    })?;

    let spec: RuleFileSpec = toml::from_str(&text)?;

    let mut groups = Vec::with_capacity(spec.groups.len());
    for group in spec.groups {
        let mut rules = Vec::with_capacity(group.rules.len());
        for rule in group.rules {
            rules.push(MatchRule::new(&rule.name, &rule.pattern).map_err(|source| {
                PurgeError::InvalidPattern {
                    rule: rule.name.clone(),
                    source,
                }
            })?);
        }
        groups.push(PurgeGroup {
            label: group.label,
            rules,
        });
    }

    Ok(groups)
}
