//! Pattern-based purge utility for crawl URL tracking stores.
//!
//! Removes never-crawled URLs whose URL matches configured patterns from a
//! crawl tracking database, grouped per source site, and reports deletion
//! counts per rule, per group, and in total.

pub mod cli;
pub mod client;
pub mod config;
pub mod models;
pub mod repository;
pub mod schema;
pub mod services;
