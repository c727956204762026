use std::time::Duration;

use async_trait::async_trait;
use fantoccini::{Client, Locator};
use serde_json::json;

use feinpreis_scraper::{ElementSnapshot, Page, PageError};

/// Collects attributes and `textContent` for every element matching a
/// selector in one round trip. `textContent` is required — the JSON-LD
/// strategy reads `<script>` bodies, which have no visible text.
const SNAPSHOT_SCRIPT: &str = "
const selector = arguments[0];
return Array.from(document.querySelectorAll(selector)).map((el) => ({
    attributes: Object.fromEntries(Array.from(el.attributes).map((a) => [a.name, a.value])),
    text: el.textContent || ''
}));
";

/// [`Page`] implementation over a live WebDriver session.
pub struct BrowserPage {
    client: Client,
}

impl BrowserPage {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Page for BrowserPage {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), PageError> {
        // WebDriver has no per-navigation deadline parameter; bound the call
        // from the outside.
        match tokio::time::timeout(timeout, self.client.goto(url)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(PageError::Navigation {
                url: url.to_string(),
                detail: e.to_string(),
            }),
            Err(_) => Err(PageError::Navigation {
                url: url.to_string(),
                detail: format!("timed out after {}s", timeout.as_secs()),
            }),
        }
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), PageError> {
        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
        {
            Ok(_) => Ok(()),
            Err(fantoccini::error::CmdError::WaitTimeout) => Err(PageError::SelectorTimeout {
                selector: selector.to_string(),
                waited_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }),
            Err(e) => Err(PageError::Query(e.to_string())),
        }
    }

    async fn query_text(&self, selector: &str) -> Result<Option<String>, PageError> {
        match self.client.find(Locator::Css(selector)).await {
            Ok(element) => {
                let text = element
                    .text()
                    .await
                    .map_err(|e| PageError::Query(e.to_string()))?;
                Ok(Some(text))
            }
            Err(e) if e.is_no_such_element() => Ok(None),
            Err(e) => Err(PageError::Query(e.to_string())),
        }
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<ElementSnapshot>, PageError> {
        let value = self
            .client
            .execute(SNAPSHOT_SCRIPT, vec![json!(selector)])
            .await
            .map_err(|e| PageError::Query(e.to_string()))?;

        serde_json::from_value(value).map_err(|e| PageError::Query(e.to_string()))
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, PageError> {
        self.client
            .execute(script, vec![])
            .await
            .map_err(|e| PageError::Evaluate(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The snapshot payload must deserialize into the scraper's element
    // shape; this pins the contract between the script and Rust.
    #[test]
    fn snapshot_payload_deserializes() {
        let payload = json!([
            {
                "attributes": { "type": "application/ld+json" },
                "text": "{\"offers\": {\"price\": 1.5}}"
            },
            { "attributes": {}, "text": "" }
        ]);

        let snapshots: Vec<ElementSnapshot> = serde_json::from_value(payload).unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(
            snapshots[0].attributes.get("type").map(String::as_str),
            Some("application/ld+json")
        );
        assert!(snapshots[1].text.is_empty());
    }

    #[test]
    fn snapshot_script_reads_text_content() {
        assert!(SNAPSHOT_SCRIPT.contains("textContent"));
        assert!(SNAPSHOT_SCRIPT.contains("arguments[0]"));
    }
}
