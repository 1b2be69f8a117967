//! Typed failures of the browser session.

use thiserror::Error;

/// Errors raised while driving the listing browser.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Failed to launch browser: {0}")]
    BrowserLaunch(String),

    #[error("Browser session is already closed")]
    SessionClosed,

    #[error("Failed to render listing page {url}: {reason}")]
    ListingRender { url: String, reason: String },
}
