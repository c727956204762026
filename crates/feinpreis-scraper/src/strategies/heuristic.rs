//! Strategy 4: last-resort keyword and currency scan over the rendered body.
//!
//! The scan itself runs inside the page (one `evaluate` call) so it sees the
//! live rendered text; only the raw numeric run comes back to Rust for
//! normalization. Accuracy is best-effort and depends entirely on keyword
//! coverage.

use async_trait::async_trait;

use crate::error::ScraperError;
use crate::normalize::parse_localized_price;
use crate::page::Page;
use crate::strategies::{Outcome, Strategy};

/// Buy-price phrases, matched against lowercased element text.
pub const KEYWORDS: [&str; 4] = ["ankaufspreis", "ankauf", "wir zahlen", "auszahlung"];

/// Body of the in-page scan function. Pass 1 takes the first numeric run in
/// any element whose text mentions a keyword; pass 2 falls back to elements
/// containing a Euro sign. The numeric pattern mirrors
/// [`crate::normalize::parse_localized_price`], with no-break space variants
/// accepted as grouping characters.
const SCAN_TEMPLATE: &str = r"
const keywords = __KEYWORDS__;
const pattern = /\d+(?:[. \u00A0\u202F]\d{3})*(?:[.,]\d+)?/;
if (!document.body) {
    return null;
}
const elements = document.body.querySelectorAll('*');
for (const el of elements) {
    const text = (el.innerText || '').trim();
    if (!text) {
        continue;
    }
    const lower = text.toLowerCase();
    if (keywords.some((k) => lower.includes(k))) {
        const m = text.match(pattern);
        if (m) {
            return m[0];
        }
    }
}
for (const el of elements) {
    const text = el.innerText || '';
    if (!text.includes('€')) {
        continue;
    }
    const m = text.match(pattern);
    if (m) {
        return m[0];
    }
}
return null;
";

fn scan_script() -> String {
    let keywords = serde_json::to_string(&KEYWORDS).expect("keyword list serializes");
    SCAN_TEMPLATE.replace("__KEYWORDS__", &keywords)
}

pub struct HeuristicStrategy;

#[async_trait]
impl Strategy for HeuristicStrategy {
    fn tag(&self) -> &'static str {
        "heuristic"
    }

    async fn attempt(&self, page: &dyn Page) -> Result<Outcome, ScraperError> {
        let value = page.evaluate(&scan_script()).await?;

        match value {
            serde_json::Value::Null => Ok(Outcome::NotFound),
            serde_json::Value::String(raw) => {
                Ok(parse_localized_price(&raw).map_or(Outcome::NotFound, Outcome::Found))
            }
            other => Err(ScraperError::UnexpectedScriptResult(other.to_string())),
        }
    }
}
