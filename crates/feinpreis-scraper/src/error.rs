use thiserror::Error;

use crate::page::PageError;

/// Failures crossing a strategy boundary.
///
/// Expected absence of data (no selector match, malformed JSON-LD, no meta
/// tags) is *not* an error — strategies report those as
/// [`crate::strategies::Outcome::NotFound`]. These variants cover the page
/// contract itself failing; the chain runner converts them to diagnostic
/// notes rather than aborting the target.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("page query failed: {0}")]
    Page(#[from] PageError),

    #[error("unexpected script result: {0}")]
    UnexpectedScriptResult(String),
}
