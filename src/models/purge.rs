//! Purge rule model: named match rules grouped per source site, and the
//! report accumulated while applying them.

use regex::Regex;
use serde::Deserialize;

/// A named predicate selecting never-crawled URLs for deletion.
///
/// The pattern is compiled once at construction and matched unanchored, so
/// `forum\.example\.ch/posting\.php` matches anywhere inside the URL.
#[derive(Debug, Clone)]
pub struct MatchRule {
    name: String,
    pattern: Regex,
}

impl MatchRule {
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pattern string as written in the rule file.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn is_match(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }
}

/// A labeled, ordered set of match rules reported as one subtotal.
#[derive(Debug, Clone)]
pub struct PurgeGroup {
    pub label: String,
    pub rules: Vec<MatchRule>,
}

/// Raw shape of a rule file before pattern compilation.
///
/// ```toml
/// [[group]]
/// label = "zscfans"
///
/// [[group.rule]]
/// name = "posting"
/// pattern = 'forum\.zscfans\.ch/posting\.php'
/// ```
#[derive(Debug, Deserialize)]
pub struct RuleFileSpec {
    #[serde(default, rename = "group")]
    pub groups: Vec<GroupSpec>,
}

#[derive(Debug, Deserialize)]
pub struct GroupSpec {
    pub label: String,
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleSpec>,
}

#[derive(Debug, Deserialize)]
pub struct RuleSpec {
    pub name: String,
    pub pattern: String,
}

/// Deletion count for one rule.
#[derive(Debug, Clone)]
pub struct RuleCount {
    pub rule: String,
    pub pattern: String,
    pub deleted: u64,
}

/// Per-group outcome: rule counts in declared order.
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub label: String,
    pub rules: Vec<RuleCount>,
}

impl GroupReport {
    pub fn subtotal(&self) -> u64 {
        self.rules.iter().map(|r| r.deleted).sum()
    }
}

/// Aggregated outcome of a purge run. Derived, never persisted.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub groups: Vec<GroupReport>,
}

impl RunReport {
    pub fn total(&self) -> u64 {
        self.groups.iter().map(|g| g.subtotal()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_is_unanchored_substring() {
        let rule = MatchRule::new("posting", r"forum\.zscfans\.ch/posting\.php").unwrap();
        assert!(rule.is_match("https://forum.zscfans.ch/posting.php?mode=reply&t=1"));
        assert!(rule.is_match("forum.zscfans.ch/posting.php"));
        assert!(!rule.is_match("forum.zscfans.ch/viewtopic.php"));
        // Escaped dots must not match arbitrary characters
        assert!(!rule.is_match("forumXzscfansXch/postingXphp"));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(MatchRule::new("broken", "[unclosed").is_err());
    }

    #[test]
    fn report_totals_are_additive() {
        let report = RunReport {
            groups: vec![
                GroupReport {
                    label: "zsc".into(),
                    rules: vec![
                        RuleCount {
                            rule: "posting".into(),
                            pattern: String::new(),
                            deleted: 2,
                        },
                        RuleCount {
                            rule: "memberlist".into(),
                            pattern: String::new(),
                            deleted: 0,
                        },
                    ],
                },
                GroupReport {
                    label: "celica".into(),
                    rules: vec![RuleCount {
                        rule: "attachment".into(),
                        pattern: String::new(),
                        deleted: 3,
                    }],
                },
            ],
        };

        assert_eq!(report.groups[0].subtotal(), 2);
        assert_eq!(report.groups[1].subtotal(), 3);
        assert_eq!(report.total(), 5);
    }

    #[test]
    fn rule_file_parses_in_declared_order() {
        let text = r#"
            [[group]]
            label = "zscfans"

            [[group.rule]]
            name = "posting"
            pattern = 'forum\.zscfans\.ch/posting\.php'

            [[group.rule]]
            name = "memberlist"
            pattern = 'forum\.zscfans\.ch/memberlist\.php'

            [[group]]
            label = "celica"

            [[group.rule]]
            name = "attachment"
            pattern = 'www\.celica-t23\.ch.*attachment\.php'
        "#;

        let spec: RuleFileSpec = toml::from_str(text).unwrap();
        assert_eq!(spec.groups.len(), 2);
        assert_eq!(spec.groups[0].label, "zscfans");
        assert_eq!(spec.groups[0].rules.len(), 2);
        assert_eq!(spec.groups[0].rules[0].name, "posting");
        assert_eq!(spec.groups[1].rules[0].name, "attachment");
    }
}
