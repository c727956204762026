//! Strategy 3: price hints in `<meta>` tags (Open Graph and friends).

use async_trait::async_trait;

use crate::error::ScraperError;
use crate::normalize::parse_localized_price;
use crate::page::Page;
use crate::strategies::{Outcome, Strategy};

/// Substrings that mark a meta tag as price-bearing, matched
/// case-insensitively against `name` or `property`.
const PRICE_NAME_HINTS: [&str; 3] = ["price", "og:price", "product:price:amount"];

pub struct MetaStrategy;

#[async_trait]
impl Strategy for MetaStrategy {
    fn tag(&self) -> &'static str {
        "meta"
    }

    async fn attempt(&self, page: &dyn Page) -> Result<Outcome, ScraperError> {
        let tags = page.query_all("meta").await?;

        for tag in tags {
            let Some(name) = tag
                .attributes
                .get("name")
                .or_else(|| tag.attributes.get("property"))
            else {
                continue;
            };

            let lower = name.to_lowercase();
            if !PRICE_NAME_HINTS.iter().any(|hint| lower.contains(hint)) {
                continue;
            }

            if let Some(content) = tag.attributes.get("content") {
                if let Some(value) = parse_localized_price(content) {
                    return Ok(Outcome::Found(value));
                }
            }
        }

        Ok(Outcome::NotFound)
    }
}
