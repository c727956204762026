//! Price extraction strategies.
//!
//! Each strategy is one independent way of pulling a raw price signal out of
//! a rendered page. The chain runner (`crate::chain`) tries them in fixed
//! priority order — explicit selector, JSON-LD structured data, meta tags,
//! heuristic text search — and stops at the first hit.

mod heuristic;
mod jsonld;
mod meta;
mod selector;

pub use heuristic::{HeuristicStrategy, KEYWORDS};
pub use jsonld::JsonLdStrategy;
pub use meta::MetaStrategy;
pub use selector::SelectorStrategy;

#[cfg(test)]
pub(crate) use jsonld::JSONLD_SELECTOR;

use async_trait::async_trait;

use crate::error::ScraperError;
use crate::page::Page;

/// Result of one strategy attempt.
///
/// Expected absence of data is `NotFound`, never an error; only a failing
/// page contract surfaces as `Err` at the strategy boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Found(f64),
    NotFound,
}

#[async_trait]
pub trait Strategy: Send + Sync {
    /// Note tag appended when this strategy produces the price.
    fn tag(&self) -> &'static str;

    /// Note tag appended when this strategy was attempted and missed.
    /// `None` means a clean miss leaves no note.
    fn miss_tag(&self) -> Option<&'static str> {
        None
    }

    async fn attempt(&self, page: &dyn Page) -> Result<Outcome, ScraperError>;
}
