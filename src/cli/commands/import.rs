//! Import command: seed URLs into the store.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Settings;
use crate::repository::{SqlitePool, UrlRepository};

/// Import URLs from a line-per-URL file into the store.
pub async fn cmd_import(
    settings: &Settings,
    file: &Path,
    source: Option<&str>,
    skip_invalid: bool,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("cannot read URL file {}", file.display()))?;

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    let repo = UrlRepository::new(SqlitePool::new(&settings.database_url()));

    let pb = ProgressBar::new(lines.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  {prefix:>8} [{bar:40.cyan/dim}] {pos}/{len}")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb.set_prefix("urls");
    pb.enable_steady_tick(Duration::from_millis(100));

    let mut added = 0u64;
    let mut known = 0u64;
    let mut invalid = 0u64;

    for line in lines {
        if url::Url::parse(line).is_err() {
            if skip_invalid {
                invalid += 1;
                pb.inc(1);
                continue;
            }
            pb.finish_and_clear();
            anyhow::bail!("invalid URL: {line}");
        }

        if repo.add_url(line, source).await? {
            added += 1;
        } else {
            known += 1;
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    println!(
        "{} Imported {} URLs ({} already known, {} invalid skipped)",
        style("✓").green(),
        added,
        known,
        invalid
    );

    Ok(())
}
