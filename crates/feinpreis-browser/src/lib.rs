//! WebDriver-backed implementation of the scraper's page contract.
//!
//! Everything browser-specific — session setup, chrome options, how a CSS
//! wait or a bulk snapshot is actually performed — lives here, behind
//! [`feinpreis_scraper::Page`].

mod driver;
mod page;

pub use driver::{Browser, BrowserConfig, BrowserError};
pub use page::BrowserPage;
