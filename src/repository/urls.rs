//! CRUD operations for the URL tracking store.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{CrawlEventRecord, NewCrawlEvent, NewUrl, UrlRecord};
use super::pool::{DbError, SqlitePool};
use crate::schema::{crawl_events, urls};

/// Repository over the `urls` and `crawl_events` tables.
#[derive(Clone)]
pub struct UrlRepository {
    pool: SqlitePool,
}

impl UrlRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a URL if not already known. Returns true if inserted.
    pub async fn add_url(&self, url: &str, source: Option<&str>) -> Result<bool, DbError> {
        use diesel::dsl::count_star;

        let mut conn = self.pool.get().await?;

        let exists: i64 = urls::table
            .filter(urls::url.eq(url))
            .select(count_star())
            .first(&mut conn)
            .await?;

        if exists > 0 {
            return Ok(false);
        }

        let discovered_at = Utc::now().to_rfc3339();
        diesel::insert_into(urls::table)
            .values(&NewUrl {
                url,
                source,
                discovered_at: &discovered_at,
            })
            .execute(&mut conn)
            .await?;

        Ok(true)
    }

    /// Append a crawl event to a URL's history. Returns false if the URL
    /// is not tracked.
    pub async fn record_crawl(&self, url: &str, sentence_count: i32) -> Result<bool, DbError> {
        let mut conn = self.pool.get().await?;

        let url_id: Option<i32> = urls::table
            .filter(urls::url.eq(url))
            .select(urls::id)
            .first(&mut conn)
            .await
            .optional()?;

        let Some(url_id) = url_id else {
            return Ok(false);
        };

        let crawled_at = Utc::now().to_rfc3339();
        diesel::insert_into(crawl_events::table)
            .values(&NewCrawlEvent {
                url_id,
                crawled_at: &crawled_at,
                sentence_count,
            })
            .execute(&mut conn)
            .await?;

        Ok(true)
    }

    /// Check if a URL is tracked.
    pub async fn url_exists(&self, url: &str) -> Result<bool, DbError> {
        use diesel::dsl::count_star;

        let mut conn = self.pool.get().await?;
        let count: i64 = urls::table
            .filter(urls::url.eq(url))
            .select(count_star())
            .first(&mut conn)
            .await?;
        Ok(count > 0)
    }

    /// All URLs with an empty crawl history.
    pub async fn never_crawled(&self) -> Result<Vec<UrlRecord>, DbError> {
        let mut conn = self.pool.get().await?;

        urls::table
            .left_outer_join(crawl_events::table)
            .filter(crawl_events::id.is_null())
            .select(UrlRecord::as_select())
            .order(urls::id.asc())
            .load(&mut conn)
            .await
    }

    /// A URL's crawl history, oldest first.
    pub async fn crawl_history(&self, url: &str) -> Result<Vec<CrawlEventRecord>, DbError> {
        let mut conn = self.pool.get().await?;

        crawl_events::table
            .inner_join(urls::table)
            .filter(urls::url.eq(url))
            .select(CrawlEventRecord::as_select())
            .order(crawl_events::id.asc())
            .load(&mut conn)
            .await
    }

    /// Delete URLs by id. Returns the number of rows deleted.
    pub async fn delete_by_ids(&self, ids: &[i32]) -> Result<usize, DbError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut conn = self.pool.get().await?;
        let mut deleted = 0;

        // Chunked to stay under SQLite's bound-variable limit.
        for chunk in ids.chunks(500) {
            deleted += diesel::delete(urls::table.filter(urls::id.eq_any(chunk.iter().copied())))
                .execute(&mut conn)
                .await?;
        }

        Ok(deleted)
    }

    /// Total number of tracked URLs.
    pub async fn count_urls(&self) -> Result<u64, DbError> {
        use diesel::dsl::count_star;

        let mut conn = self.pool.get().await?;
        let count: i64 = urls::table.select(count_star()).first(&mut conn).await?;
        Ok(count as u64)
    }

    /// Number of tracked URLs with an empty crawl history.
    pub async fn count_never_crawled(&self) -> Result<u64, DbError> {
        use diesel::dsl::count_star;

        let mut conn = self.pool.get().await?;
        let count: i64 = urls::table
            .left_outer_join(crawl_events::table)
            .filter(crawl_events::id.is_null())
            .select(count_star())
            .first(&mut conn)
            .await?;
        Ok(count as u64)
    }
}
