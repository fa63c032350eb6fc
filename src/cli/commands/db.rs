//! Database management commands.

use console::style;

use crate::config::Settings;
use crate::repository::migrations::{pending_migrations, run_migrations};

/// Run database migrations.
pub async fn cmd_migrate(settings: &Settings, check: bool) -> anyhow::Result<()> {
    let url = settings.database_url();

    println!("{} Database migration", style("→").cyan());
    println!("  Database: {}", url);

    if check {
        let pending = pending_migrations(&url).await?;
        if pending.is_empty() {
            println!("\n{} Schema is up to date.", style("✓").green());
        } else {
            for name in &pending {
                println!("  pending: {}", name);
            }
            println!(
                "\n{} {} pending migration(s). Run 'urlsweep db migrate' to apply.",
                style("!").yellow(),
                pending.len()
            );
        }
        return Ok(());
    }

    run_migrations(&url).await?;
    println!("{} Migration complete!", style("✓").green());

    Ok(())
}
