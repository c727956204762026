//! Batch orchestration: one rendered page per target, strictly sequential.

use std::time::Duration;

use chrono::Utc;
use feinpreis_core::{Report, ScrapeResult, Target};

use crate::chain::{build_chain, run_chain};
use crate::pacing::{pause_between_targets, PacingConfig};
use crate::page::Page;

#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Label stamped into the report's `source` field.
    pub source: String,
    pub navigation_timeout: Duration,
    pub selector_timeout: Duration,
    pub pacing: PacingConfig,
}

/// Scrape every target in order against one shared page and assemble the
/// run's report.
///
/// Per-target failures — navigation included — never abort the batch; they
/// surface only through the result's `notes`. The report's items preserve
/// target order and count.
pub async fn run_batch(page: &dyn Page, targets: &[Target], config: &BatchConfig) -> Report {
    let mut items = Vec::with_capacity(targets.len());

    for (idx, target) in targets.iter().enumerate() {
        if idx > 0 {
            pause_between_targets(config.pacing).await;
        }

        let result = scrape_target(page, target, config).await;
        tracing::info!(
            target = %result.id,
            ok = result.ok,
            price = result.price,
            "target finished"
        );
        items.push(result);
    }

    Report {
        source: config.source.clone(),
        generated_at: Utc::now(),
        items,
    }
}

/// Navigate to the target's page and run the extraction chain.
///
/// A failed navigation is recorded as a note and extraction still runs:
/// the strategies will miss naturally against a blank or stale page, and
/// the audit trail shows exactly what happened.
async fn scrape_target(page: &dyn Page, target: &Target, config: &BatchConfig) -> ScrapeResult {
    tracing::info!(target = %target.id, url = %target.url, "scraping target");

    let mut notes = Vec::new();

    if let Err(e) = page.navigate(&target.url, config.navigation_timeout).await {
        tracing::warn!(target = %target.id, error = %e, "page load failed; extracting anyway");
        notes.push(format!("page-load-failed: {e}"));
    }

    let strategies = build_chain(target, config.selector_timeout);
    let (price, chain_notes) = run_chain(page, &strategies).await;
    notes.extend(chain_notes);

    ScrapeResult {
        id: target.id.clone(),
        name: target.name.clone(),
        url: target.url.clone(),
        metal: target.metal,
        fine_in_grams: target.fine_in_grams,
        price,
        ok: price.is_some(),
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::testing::{meta_snapshot, FakePage};
    use feinpreis_core::Metal;

    fn make_target(id: &str, selector: Option<&str>) -> Target {
        Target {
            id: id.to_string(),
            name: format!("Target {id}"),
            url: format!("https://dealer.example/{id}"),
            metal: Some(Metal::Gold),
            fine_in_grams: Some(31.103),
            selector: selector.map(str::to_string),
        }
    }

    fn make_config() -> BatchConfig {
        BatchConfig {
            source: "feinpreis-test".to_string(),
            navigation_timeout: Duration::from_millis(10),
            selector_timeout: Duration::from_millis(10),
            pacing: PacingConfig::new(0, 0),
        }
    }

    #[tokio::test]
    async fn report_preserves_target_order_and_count() {
        let page = FakePage::default().with_eval_result(serde_json::Value::Null);
        let targets = vec![
            make_target("a", None),
            make_target("b", None),
            make_target("c", None),
        ];

        let report = run_batch(&page, &targets, &make_config()).await;

        assert_eq!(report.source, "feinpreis-test");
        assert_eq!(report.items.len(), 3);
        let ids: Vec<&str> = report.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn ok_mirrors_price_presence() {
        let page = FakePage::default()
            .with_element("meta", meta_snapshot("name", "price", "99,99"))
            .with_eval_result(serde_json::Value::Null);

        let report = run_batch(&page, &[make_target("a", None)], &make_config()).await;

        let item = &report.items[0];
        assert_eq!(item.price, Some(99.99));
        assert!(item.ok);
        assert_eq!(item.notes, vec!["meta"]);
    }

    #[tokio::test]
    async fn total_failure_keeps_invariants() {
        let page = FakePage::default().with_eval_result(serde_json::Value::Null);

        let report = run_batch(&page, &[make_target("a", None)], &make_config()).await;

        let item = &report.items[0];
        assert_eq!(item.price, None);
        assert!(!item.ok);
        assert_eq!(item.notes.last().map(String::as_str), Some("not-found"));
    }

    #[tokio::test]
    async fn navigation_failure_is_noted_and_batch_continues() {
        let page = FakePage::default()
            .with_navigate_error("net::ERR_CONNECTION_TIMED_OUT")
            .with_eval_result(serde_json::Value::Null);
        let targets = vec![make_target("down", None), make_target("up", None)];

        let report = run_batch(&page, &targets, &make_config()).await;

        assert_eq!(report.items.len(), 2, "batch must not abort");
        let first = &report.items[0];
        assert!(
            first.notes[0].starts_with("page-load-failed:"),
            "got: {:?}",
            first.notes
        );
        assert_eq!(first.notes.last().map(String::as_str), Some("not-found"));
        assert!(!first.ok);
    }

    #[tokio::test]
    async fn result_carries_target_metadata() {
        let page = FakePage::default().with_eval_result(serde_json::Value::Null);

        let report = run_batch(&page, &[make_target("a", None)], &make_config()).await;

        let item = &report.items[0];
        assert_eq!(item.metal, Some(Metal::Gold));
        assert_eq!(item.fine_in_grams, Some(31.103));
        assert_eq!(item.url, "https://dealer.example/a");
    }

    #[tokio::test]
    async fn rerun_on_unchanged_page_is_identical() {
        let page = FakePage::default()
            .with_element("meta", meta_snapshot("name", "price", "10,00"))
            .with_eval_result(serde_json::Value::Null);
        let targets = vec![make_target("a", Some("#missing")), make_target("b", None)];
        let config = make_config();

        let first = run_batch(&page, &targets, &config).await;
        let second = run_batch(&page, &targets, &config).await;

        for (a, b) in first.items.iter().zip(second.items.iter()) {
            assert_eq!(a.price, b.price);
            assert_eq!(a.ok, b.ok);
            assert_eq!(a.notes, b.notes);
        }
    }
}
