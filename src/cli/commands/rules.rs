//! Rule file management commands.

use std::path::Path;

use console::style;

use crate::services::load_rule_file;

/// Parse a rule file, compile its patterns, and list its groups.
pub fn cmd_rules_check(rules_path: &Path) -> anyhow::Result<()> {
    let groups = load_rule_file(rules_path)?;

    let mut rule_count = 0;
    for group in &groups {
        println!("{}", style(&group.label).bold());
        for rule in &group.rules {
            println!("  {:<20} {}", rule.name(), rule.pattern());
            rule_count += 1;
        }
    }

    println!(
        "\n{} {} group(s), {} rule(s), all patterns compile.",
        style("✓").green(),
        groups.len(),
        rule_count
    );

    Ok(())
}
