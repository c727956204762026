//! Strategy 2: schema.org JSON-LD structured product data.

use async_trait::async_trait;

use crate::error::ScraperError;
use crate::page::Page;
use crate::strategies::{Outcome, Strategy};

pub(crate) const JSONLD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// Reads `<script type="application/ld+json">` blocks in document order and
/// returns the first offer price. Structured data is machine-formatted, so
/// values are coerced directly to numbers with no locale normalization.
pub struct JsonLdStrategy;

#[async_trait]
impl Strategy for JsonLdStrategy {
    fn tag(&self) -> &'static str {
        "json-ld"
    }

    async fn attempt(&self, page: &dyn Page) -> Result<Outcome, ScraperError> {
        let scripts = page.query_all(JSONLD_SELECTOR).await?;

        for script in scripts {
            // Malformed blocks are common in the wild; skip, don't fail.
            let Ok(value) = serde_json::from_str::<serde_json::Value>(&script.text) else {
                continue;
            };

            // Accept a top-level object, array, or @graph container.
            let mut candidates: Vec<serde_json::Value> = if let Some(arr) = value.as_array() {
                arr.clone()
            } else {
                vec![value]
            };

            let mut expanded = Vec::new();
            for item in &candidates {
                if let Some(graph) = item.get("@graph").and_then(serde_json::Value::as_array) {
                    expanded.extend(graph.iter().cloned());
                }
            }
            candidates.extend(expanded);

            for item in candidates {
                if let Some(price) = offer_price(&item) {
                    return Ok(Outcome::Found(price));
                }
            }
        }

        Ok(Outcome::NotFound)
    }
}

/// Price of an item's offer: `offers.price`, falling back to
/// `offers.priceSpecification.price`. `offers` may be a single object or an
/// array, in which case the first entry counts.
fn offer_price(item: &serde_json::Value) -> Option<f64> {
    let offers = item.get("offers")?;
    let offer = match offers.as_array() {
        Some(arr) => arr.first()?,
        None => offers,
    };

    coerce_number(offer.get("price")).or_else(|| {
        coerce_number(
            offer
                .get("priceSpecification")
                .and_then(|spec| spec.get("price")),
        )
    })
}

/// JSON-LD prices appear both as numbers and as machine-formatted strings
/// (`"2431.50"`).
fn coerce_number(value: Option<&serde_json::Value>) -> Option<f64> {
    let parsed = match value? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}
