//! Strategy 1: explicit CSS selector configured on the target.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScraperError;
use crate::normalize::parse_localized_price;
use crate::page::{Page, PageError};
use crate::strategies::{Outcome, Strategy};

/// The most precise strategy: read the one element the target's operator
/// pointed at. Only built into the chain when a selector is configured.
pub struct SelectorStrategy {
    selector: String,
    timeout: Duration,
}

impl SelectorStrategy {
    #[must_use]
    pub fn new(selector: String, timeout: Duration) -> Self {
        Self { selector, timeout }
    }
}

#[async_trait]
impl Strategy for SelectorStrategy {
    fn tag(&self) -> &'static str {
        "selector"
    }

    fn miss_tag(&self) -> Option<&'static str> {
        Some("selector-not-found")
    }

    async fn attempt(&self, page: &dyn Page) -> Result<Outcome, ScraperError> {
        // A timeout is an expected miss, not a boundary error.
        match page.wait_for_selector(&self.selector, self.timeout).await {
            Ok(()) => {}
            Err(PageError::SelectorTimeout { .. }) => {
                tracing::debug!(selector = %self.selector, "selector did not appear");
                return Ok(Outcome::NotFound);
            }
            Err(e) => return Err(e.into()),
        }

        let Some(text) = page.query_text(&self.selector).await? else {
            return Ok(Outcome::NotFound);
        };

        Ok(parse_localized_price(&text).map_or(Outcome::NotFound, Outcome::Found))
    }
}
