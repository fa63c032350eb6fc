//! Store status command.

use console::style;
use serde::Serialize;

use crate::config::Settings;
use crate::repository::{SqlitePool, UrlRepository};

#[derive(Serialize)]
struct StatusReport {
    urls: u64,
    crawled: u64,
    never_crawled: u64,
}

impl StatusReport {
    // The two counts are separate queries; saturate so a writer sneaking
    // in between them cannot underflow the derived figure.
    fn new(urls: u64, never_crawled: u64) -> Self {
        Self {
            urls,
            crawled: urls.saturating_sub(never_crawled),
            never_crawled,
        }
    }
}

/// Show URL store totals.
pub async fn cmd_status(settings: &Settings, json: bool) -> anyhow::Result<()> {
    let repo = UrlRepository::new(SqlitePool::new(&settings.database_url()));

    let urls = repo.count_urls().await?;
    let never_crawled = repo.count_never_crawled().await?;
    let report = StatusReport::new(urls, never_crawled);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", style("URL Store Status").bold());
    println!("{}", "-".repeat(40));
    println!("{:<20} {}", "Tracked URLs:", report.urls);
    println!("{:<20} {}", "Crawled:", report.crawled);
    println!("{:<20} {}", "Never crawled:", report.never_crawled);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crawled_count_never_underflows() {
        let report = StatusReport::new(3, 2);
        assert_eq!(report.crawled, 1);

        // Counts taken from racing snapshots must not wrap around.
        let report = StatusReport::new(2, 3);
        assert_eq!(report.crawled, 0);
    }
}
