//! Diesel ORM models for database tables.

use diesel::prelude::*;

use crate::schema;

/// URL record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::urls)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UrlRecord {
    pub id: i32,
    pub url: String,
    pub source: Option<String>,
    pub discovered_at: String,
}

/// New URL for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::urls)]
pub struct NewUrl<'a> {
    pub url: &'a str,
    pub source: Option<&'a str>,
    pub discovered_at: &'a str,
}

/// Crawl event record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::crawl_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CrawlEventRecord {
    pub id: i32,
    pub url_id: i32,
    pub crawled_at: String,
    pub sentence_count: i32,
}

/// New crawl event for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::crawl_events)]
pub struct NewCrawlEvent<'a> {
    pub url_id: i32,
    pub crawled_at: &'a str,
    pub sentence_count: i32,
}
