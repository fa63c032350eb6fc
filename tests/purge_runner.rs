//! Integration tests for the purge runner against a real SQLite store.

use tempfile::TempDir;

use urlsweep::models::{MatchRule, PurgeGroup};
use urlsweep::repository::migrations::run_migrations;
use urlsweep::repository::{SqlitePool, UrlRepository};
use urlsweep::services::{PurgeError, PurgeRunner};

async fn test_repo(dir: &TempDir) -> UrlRepository {
    let db = dir.path().join("urlsweep.db");
    let url = db.display().to_string();
    run_migrations(&url).await.unwrap();
    UrlRepository::new(SqlitePool::new(&url))
}

fn rule(name: &str, pattern: &str) -> MatchRule {
    MatchRule::new(name, pattern).unwrap()
}

fn group(label: &str, rules: Vec<MatchRule>) -> PurgeGroup {
    PurgeGroup {
        label: label.to_string(),
        rules,
    }
}

#[tokio::test]
async fn apply_rule_deletes_never_crawled_match() {
    let dir = TempDir::new().unwrap();
    let repo = test_repo(&dir).await;

    repo.add_url("forum.zscfans.ch/posting.php?x=1", None)
        .await
        .unwrap();

    let runner = PurgeRunner::new(&repo);
    let deleted = runner
        .apply_rule(&rule("posting", r"forum\.zscfans\.ch/posting\.php"))
        .await
        .unwrap();

    assert_eq!(deleted, 1);
    assert!(!repo
        .url_exists("forum.zscfans.ch/posting.php?x=1")
        .await
        .unwrap());
    assert_eq!(repo.count_urls().await.unwrap(), 0);
}

#[tokio::test]
async fn crawled_urls_are_retained() {
    let dir = TempDir::new().unwrap();
    let repo = test_repo(&dir).await;

    repo.add_url("forum.zscfans.ch/posting.php?x=1", None)
        .await
        .unwrap();
    assert!(repo
        .record_crawl("forum.zscfans.ch/posting.php?x=1", 3)
        .await
        .unwrap());

    let runner = PurgeRunner::new(&repo);
    let deleted = runner
        .apply_rule(&rule("posting", r"forum\.zscfans\.ch/posting\.php"))
        .await
        .unwrap();

    assert_eq!(deleted, 0);
    assert!(repo
        .url_exists("forum.zscfans.ch/posting.php?x=1")
        .await
        .unwrap());
}

#[tokio::test]
async fn only_the_matching_subset_is_deleted() {
    let dir = TempDir::new().unwrap();
    let repo = test_repo(&dir).await;

    repo.add_url("forum.zscfans.ch/posting.php?t=1", None)
        .await
        .unwrap();
    repo.add_url("forum.zscfans.ch/viewtopic.php?t=1", None)
        .await
        .unwrap();
    repo.add_url("www.other-site.ch/posting.php", None)
        .await
        .unwrap();

    let runner = PurgeRunner::new(&repo);
    let deleted = runner
        .apply_rule(&rule("posting", r"forum\.zscfans\.ch/posting\.php"))
        .await
        .unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(repo.count_urls().await.unwrap(), 2);
    assert!(repo
        .url_exists("forum.zscfans.ch/viewtopic.php?t=1")
        .await
        .unwrap());
    assert!(repo.url_exists("www.other-site.ch/posting.php").await.unwrap());
}

#[tokio::test]
async fn no_matches_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let repo = test_repo(&dir).await;

    repo.add_url("www.example.ch/index.html", None)
        .await
        .unwrap();

    let runner = PurgeRunner::new(&repo);
    let deleted = runner
        .apply_rule(&rule("nothing", r"does-not-exist\.example"))
        .await
        .unwrap();

    assert_eq!(deleted, 0);
    assert_eq!(repo.count_urls().await.unwrap(), 1);
}

#[tokio::test]
async fn run_reports_subtotals_and_total() {
    let dir = TempDir::new().unwrap();
    let repo = test_repo(&dir).await;

    // Group "zsc" matches two records, group "celica" matches three.
    repo.add_url("forum.zscfans.ch/posting.php?t=1", Some("zscfans"))
        .await
        .unwrap();
    repo.add_url("forum.zscfans.ch/memberlist.php?mode=a", Some("zscfans"))
        .await
        .unwrap();
    repo.add_url("www.celica-t23.ch/forum/attachment.php?id=1", Some("celica"))
        .await
        .unwrap();
    repo.add_url("www.celica-t23.ch/forum/report.php?id=2", Some("celica"))
        .await
        .unwrap();
    repo.add_url("www.celica-t23.ch/board/formmail.php", Some("celica"))
        .await
        .unwrap();
    // And one crawled record that must survive.
    repo.add_url("www.celica-t23.ch/forum/attachment.php?id=9", Some("celica"))
        .await
        .unwrap();
    repo.record_crawl("www.celica-t23.ch/forum/attachment.php?id=9", 12)
        .await
        .unwrap();

    let groups = vec![
        group(
            "zsc",
            vec![
                rule("posting", r"forum\.zscfans\.ch/posting\.php"),
                rule("memberlist", r"forum\.zscfans\.ch/memberlist\.php"),
            ],
        ),
        group(
            "celica",
            vec![
                rule("attachment", r"www\.celica-t23\.ch.*attachment\.php"),
                rule("report", r"www\.celica-t23\.ch.*report\.php"),
                rule("formmail", r"www\.celica-t23\.ch.*formmail\.php"),
            ],
        ),
    ];

    let runner = PurgeRunner::new(&repo);
    let report = runner.run(&groups).await.unwrap();

    assert_eq!(report.groups.len(), 2);
    assert_eq!(report.groups[0].label, "zsc");
    assert_eq!(report.groups[0].subtotal(), 2);
    assert_eq!(report.groups[1].label, "celica");
    assert_eq!(report.groups[1].subtotal(), 3);
    assert_eq!(report.total(), 5);

    // Total equals the sum of all per-rule counts.
    let rule_sum: u64 = report
        .groups
        .iter()
        .flat_map(|g| g.rules.iter())
        .map(|r| r.deleted)
        .sum();
    assert_eq!(report.total(), rule_sum);

    // The crawled record survived.
    assert_eq!(repo.count_urls().await.unwrap(), 1);
    assert!(repo
        .url_exists("www.celica-t23.ch/forum/attachment.php?id=9")
        .await
        .unwrap());
}

#[tokio::test]
async fn second_run_deletes_nothing() {
    let dir = TempDir::new().unwrap();
    let repo = test_repo(&dir).await;

    repo.add_url("forum.zscfans.ch/posting.php?t=1", None)
        .await
        .unwrap();
    repo.add_url("forum.zscfans.ch/posting.php?t=2", None)
        .await
        .unwrap();

    let groups = vec![group(
        "zsc",
        vec![rule("posting", r"forum\.zscfans\.ch/posting\.php")],
    )];

    let runner = PurgeRunner::new(&repo);
    let first = runner.run(&groups).await.unwrap();
    assert_eq!(first.total(), 2);

    let second = runner.run(&groups).await.unwrap();
    assert_eq!(second.total(), 0);
}

#[tokio::test]
async fn overlapping_rules_count_sequentially() {
    let dir = TempDir::new().unwrap();
    let repo = test_repo(&dir).await;

    repo.add_url("forum.zscfans.ch/posting.php?t=1", None)
        .await
        .unwrap();

    // Both rules match the same record; the first deletes it, so the
    // second sees nothing.
    let groups = vec![group(
        "zsc",
        vec![
            rule("posting", r"forum\.zscfans\.ch/posting\.php"),
            rule("any-php", r"forum\.zscfans\.ch/.*\.php"),
        ],
    )];

    let runner = PurgeRunner::new(&repo);
    let report = runner.run(&groups).await.unwrap();

    assert_eq!(report.groups[0].rules[0].deleted, 1);
    assert_eq!(report.groups[0].rules[1].deleted, 0);
    assert_eq!(report.total(), 1);
}

#[tokio::test]
async fn dry_run_counts_without_deleting() {
    let dir = TempDir::new().unwrap();
    let repo = test_repo(&dir).await;

    repo.add_url("forum.zscfans.ch/posting.php?t=1", None)
        .await
        .unwrap();
    repo.add_url("forum.zscfans.ch/posting.php?t=2", None)
        .await
        .unwrap();

    let groups = vec![group(
        "zsc",
        vec![rule("posting", r"forum\.zscfans\.ch/posting\.php")],
    )];

    let runner = PurgeRunner::dry_run(&repo);
    let report = runner.run(&groups).await.unwrap();

    assert_eq!(report.total(), 2);
    assert_eq!(repo.count_urls().await.unwrap(), 2);
}

#[tokio::test]
async fn status_counts_track_crawl_history() {
    let dir = TempDir::new().unwrap();
    let repo = test_repo(&dir).await;

    repo.add_url("www.example.ch/a", None).await.unwrap();
    repo.add_url("www.example.ch/b", None).await.unwrap();
    repo.add_url("www.example.ch/c", None).await.unwrap();
    repo.record_crawl("www.example.ch/a", 5).await.unwrap();
    // A second crawl of the same URL must not skew the counts.
    repo.record_crawl("www.example.ch/a", 2).await.unwrap();

    assert_eq!(repo.count_urls().await.unwrap(), 3);
    assert_eq!(repo.count_never_crawled().await.unwrap(), 2);

    let history = repo.crawl_history("www.example.ch/a").await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].sentence_count, 5);
    assert_eq!(history[1].sentence_count, 2);
    assert!(repo.crawl_history("www.example.ch/b").await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_run_hands_back_the_partial_report() {
    let repo = UrlRepository::new(SqlitePool::new("/nonexistent-dir/nope/urlsweep.db"));

    let groups = vec![
        group(
            "zsc",
            vec![rule("posting", r"forum\.zscfans\.ch/posting\.php")],
        ),
        group(
            "celica",
            vec![rule("report", r"www\.celica-t23\.ch.*report\.php")],
        ),
    ];

    let runner = PurgeRunner::new(&repo);
    let failure = runner.run(&groups).await.unwrap_err();

    assert!(matches!(failure.error, PurgeError::StoreUnavailable(_)));
    // The first rule failed, so the report holds only the first group,
    // with no per-rule lines, and the second group was never started.
    assert_eq!(failure.partial.groups.len(), 1);
    assert_eq!(failure.partial.groups[0].label, "zsc");
    assert!(failure.partial.groups[0].rules.is_empty());
    assert_eq!(failure.partial.total(), 0);
}

#[tokio::test]
async fn unreachable_store_is_reported() {
    let repo = UrlRepository::new(SqlitePool::new("/nonexistent-dir/nope/urlsweep.db"));

    let runner = PurgeRunner::new(&repo);
    let err = runner
        .apply_rule(&rule("posting", r"posting\.php"))
        .await
        .unwrap_err();

    assert!(matches!(err, PurgeError::StoreUnavailable(_)));
}
