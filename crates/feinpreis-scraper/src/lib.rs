pub mod batch;
pub mod chain;
pub mod error;
pub mod normalize;
pub mod pacing;
pub mod page;
pub mod strategies;

pub use batch::{run_batch, BatchConfig};
pub use chain::{build_chain, run_chain};
pub use error::ScraperError;
pub use normalize::parse_localized_price;
pub use pacing::PacingConfig;
pub use page::{ElementSnapshot, Page, PageError};
