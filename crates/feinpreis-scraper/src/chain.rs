//! The fallback controller: strategies in fixed priority order, first hit
//! wins, every attempt leaves its trace in the notes.

use std::time::Duration;

use feinpreis_core::Target;

use crate::page::Page;
use crate::strategies::{
    HeuristicStrategy, JsonLdStrategy, MetaStrategy, Outcome, SelectorStrategy, Strategy,
};

/// Build the strategy chain for one target.
///
/// Fixed order: explicit selector (only when the target configures one),
/// JSON-LD, meta tags, heuristic scan — most precise first, so a later
/// strategy only ever runs after every more certain one has missed.
#[must_use]
pub fn build_chain(target: &Target, selector_timeout: Duration) -> Vec<Box<dyn Strategy>> {
    let mut chain: Vec<Box<dyn Strategy>> = Vec::with_capacity(4);

    if let Some(selector) = &target.selector {
        chain.push(Box::new(SelectorStrategy::new(
            selector.clone(),
            selector_timeout,
        )));
    }
    chain.push(Box::new(JsonLdStrategy));
    chain.push(Box::new(MetaStrategy));
    chain.push(Box::new(HeuristicStrategy));

    chain
}

/// Run the chain against a rendered page.
///
/// Returns the first extracted price (already normalized) and the ordered
/// note trail: the winning strategy's tag, `selector-not-found` for an
/// attempted-but-missed selector, `<tag>-error: <detail>` when a strategy's
/// page queries fail outright, and a trailing `not-found` when the chain is
/// exhausted.
pub async fn run_chain(page: &dyn Page, strategies: &[Box<dyn Strategy>]) -> (Option<f64>, Vec<String>) {
    let mut notes = Vec::new();

    for strategy in strategies {
        match strategy.attempt(page).await {
            Ok(Outcome::Found(value)) => {
                tracing::debug!(strategy = strategy.tag(), value, "price extracted");
                notes.push(strategy.tag().to_string());
                return (Some(value), notes);
            }
            Ok(Outcome::NotFound) => {
                if let Some(miss) = strategy.miss_tag() {
                    notes.push(miss.to_string());
                }
            }
            Err(e) => {
                // Strictly local: a failing strategy never aborts the target.
                tracing::warn!(strategy = strategy.tag(), error = %e, "strategy failed");
                notes.push(format!("{}-error: {e}", strategy.tag()));
            }
        }
    }

    notes.push("not-found".to_string());
    (None, notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::testing::{meta_snapshot, script_snapshot, FakePage};
    use crate::strategies::JSONLD_SELECTOR;
    use serde_json::json;

    fn make_target(selector: Option<&str>) -> Target {
        Target {
            id: "krugerrand-1oz".to_string(),
            name: "Krügerrand 1 oz".to_string(),
            url: "https://dealer.example/krugerrand".to_string(),
            metal: None,
            fine_in_grams: None,
            selector: selector.map(str::to_string),
        }
    }

    const TIMEOUT: Duration = Duration::from_millis(10);

    #[tokio::test]
    async fn selector_wins_even_when_jsonld_would_hit() {
        let page = FakePage::default()
            .with_selector_text(".ankauf", "2.431,50 €")
            .with_element(
                JSONLD_SELECTOR,
                script_snapshot(r#"{"offers": {"price": 9999.0}}"#),
            )
            .with_eval_result(serde_json::Value::Null);

        let chain = build_chain(&make_target(Some(".ankauf")), TIMEOUT);
        let (price, notes) = run_chain(&page, &chain).await;

        assert_eq!(price, Some(2431.50));
        assert_eq!(notes, vec!["selector"]);
    }

    #[tokio::test]
    async fn missing_selector_config_skips_strategy_silently() {
        let page = FakePage::default().with_element(
            JSONLD_SELECTOR,
            script_snapshot(r#"{"offers": {"price": 100.0}}"#),
        );

        let chain = build_chain(&make_target(None), TIMEOUT);
        let (price, notes) = run_chain(&page, &chain).await;

        assert_eq!(price, Some(100.0));
        assert_eq!(notes, vec!["json-ld"]);
    }

    #[tokio::test]
    async fn failed_selector_leaves_miss_note_then_falls_through() {
        let page = FakePage::default()
            .with_element("meta", meta_snapshot("property", "og:price:amount", "99,99"))
            .with_eval_result(serde_json::Value::Null);

        let chain = build_chain(&make_target(Some("#missing")), TIMEOUT);
        let (price, notes) = run_chain(&page, &chain).await;

        assert_eq!(price, Some(99.99));
        assert_eq!(notes, vec!["selector-not-found", "meta"]);
    }

    #[tokio::test]
    async fn heuristic_is_last_resort() {
        let page = FakePage::default().with_eval_result(json!("1.050,00"));

        let chain = build_chain(&make_target(None), TIMEOUT);
        let (price, notes) = run_chain(&page, &chain).await;

        assert_eq!(price, Some(1050.0));
        assert_eq!(notes, vec!["heuristic"]);
    }

    #[tokio::test]
    async fn exhausted_chain_ends_with_not_found() {
        let page = FakePage::default().with_eval_result(serde_json::Value::Null);

        let chain = build_chain(&make_target(Some("#missing")), TIMEOUT);
        let (price, notes) = run_chain(&page, &chain).await;

        assert_eq!(price, None);
        assert_eq!(notes, vec!["selector-not-found", "not-found"]);
    }

    #[tokio::test]
    async fn boundary_error_becomes_diagnostic_note() {
        // Evaluate returns a shape the heuristic cannot interpret.
        let page = FakePage::default().with_eval_result(json!(42));

        let chain = build_chain(&make_target(None), TIMEOUT);
        let (price, notes) = run_chain(&page, &chain).await;

        assert_eq!(price, None);
        assert_eq!(notes.len(), 2);
        assert!(notes[0].starts_with("heuristic-error:"), "got: {notes:?}");
        assert_eq!(notes[1], "not-found");
    }

    #[tokio::test]
    async fn chain_is_deterministic_across_runs() {
        let page = FakePage::default()
            .with_element("meta", meta_snapshot("name", "price", "10,00"))
            .with_eval_result(serde_json::Value::Null);

        let chain = build_chain(&make_target(None), TIMEOUT);
        let first = run_chain(&page, &chain).await;
        let second = run_chain(&page, &chain).await;

        assert_eq!(first, second);
    }
}
