//! The page-renderer contract consumed by the extraction strategies.
//!
//! Rendering, navigation mechanics and user-agent handling live behind this
//! trait (`feinpreis-browser` implements it with a WebDriver client); the
//! strategies only specify what they read from the rendered document.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("navigation to {url} failed: {detail}")]
    Navigation { url: String, detail: String },

    #[error("timed out after {waited_ms}ms waiting for selector {selector}")]
    SelectorTimeout { selector: String, waited_ms: u64 },

    #[error("page query failed: {0}")]
    Query(String),

    #[error("script evaluation failed: {0}")]
    Evaluate(String),
}

/// A static snapshot of one matched element: its attributes and its
/// `textContent`.
///
/// `textContent` (not visible text) is deliberate — the structured-data
/// strategy reads `<script>` bodies, which have no visible text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementSnapshot {
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub text: String,
}

/// A rendered, queryable page.
///
/// All methods are sequential, blocking calls against one shared page
/// resource; there is no parallelism between queries.
#[async_trait]
pub trait Page: Send + Sync {
    /// Navigate to `url`, bounded by `timeout`. A single attempt, no retry.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), PageError>;

    /// Wait up to `timeout` for an element matching `selector` to appear.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), PageError>;

    /// Visible text of the first element matching `selector`, if any.
    async fn query_text(&self, selector: &str) -> Result<Option<String>, PageError>;

    /// Snapshots of every element matching `selector`, in document order.
    async fn query_all(&self, selector: &str) -> Result<Vec<ElementSnapshot>, PageError>;

    /// Run `script` against the live document and return its value.
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, PageError>;
}
