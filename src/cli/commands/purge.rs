//! Purge command: apply a rule file to the URL store.

use std::path::Path;

use console::style;

use crate::config::Settings;
use crate::models::RunReport;
use crate::repository::{SqlitePool, UrlRepository};
use crate::services::{load_rule_file, PurgeRunner};

/// Delete never-crawled URLs matching the rules in a rule file.
///
/// Without `--confirm` this is a dry run: matches are counted but nothing
/// is deleted.
pub async fn cmd_purge(
    settings: &Settings,
    rules_path: &Path,
    confirm: bool,
    group_filter: &[String],
) -> anyhow::Result<()> {
    let mut groups = load_rule_file(rules_path)?;

    if !group_filter.is_empty() {
        for label in group_filter {
            if !groups.iter().any(|g| &g.label == label) {
                println!(
                    "{} No group named '{}' in {}",
                    style("!").yellow(),
                    label,
                    rules_path.display()
                );
            }
        }
        groups.retain(|g| group_filter.iter().any(|label| label == &g.label));
    }

    if groups.is_empty() {
        println!("{} No purge groups to run", style("!").yellow());
        return Ok(());
    }

    let repo = UrlRepository::new(SqlitePool::new(&settings.database_url()));
    let runner = if confirm {
        PurgeRunner::new(&repo)
    } else {
        println!(
            "{} Dry run: counting matches, deleting nothing. Use --confirm to delete.",
            style("!").yellow()
        );
        PurgeRunner::dry_run(&repo)
    };

    match runner.run(&groups).await {
        Ok(report) => {
            print_report(&report, confirm);
            println!("\nTotal: {}", report.total());
            Ok(())
        }
        Err(failure) => {
            // Emit the lines that were already produced; earlier deletions
            // stay deleted.
            print_report(&failure.partial, confirm);
            eprintln!("{} Purge aborted: {}", style("✗").red(), failure.error);
            Err(failure.error.into())
        }
    }
}

fn print_report(report: &RunReport, confirmed: bool) {
    let verb = if confirmed { "Removed" } else { "Would remove" };

    for group in &report.groups {
        for rule in &group.rules {
            println!(
                "  {}",
                style(format!(
                    "{} {} using pattern '{}'",
                    verb, rule.deleted, rule.pattern
                ))
                .dim()
            );
        }
        println!("{} {} from {}", verb, group.subtotal(), group.label);
    }
}
