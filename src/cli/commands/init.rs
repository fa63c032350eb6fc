//! Initialize command.

use console::style;

use crate::config::Settings;
use crate::repository::migrations::run_migrations;

/// Initialize the data directory and database.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    settings.ensure_directories()?;
    run_migrations(&settings.database_url()).await?;

    println!(
        "{} Initialized URL store at {}",
        style("✓").green(),
        settings.database_url()
    );

    Ok(())
}
