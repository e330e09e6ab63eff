//! Browser automation capability.
//!
//! Everything the judge client does to a live page goes through [`Driver`],
//! so the navigation sequences can be exercised against a fake browser.

use std::time::Duration;

use async_trait::async_trait;

use crate::{error::*, model::Url};

pub mod chromium;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use chromium::{BrowserOptions, ChromiumDriver, ChromiumLauncher};

/// One browser tab. Calls must not overlap: a second navigation while one is
/// pending has no defined outcome, so callers serialize access.
#[async_trait]
pub trait Driver: Send + Sync {
    async fn goto(&self, url: &Url) -> Result<()>;

    /// Polls until `selector` matches, failing with [`Error::Timeout`] after `timeout`.
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Outer HTML of the first element matching `selector`.
    async fn outer_html(&self, selector: &str) -> Result<String>;

    /// Inner text of every element matching `selector`, in document order.
    async fn texts(&self, selector: &str) -> Result<Vec<String>>;

    async fn type_into(&self, selector: &str, text: &str) -> Result<()>;

    async fn click(&self, selector: &str) -> Result<()>;

    /// Picks the `<option>` whose visible text equals `text` exactly.
    async fn select_option_by_text(&self, selector: &str, text: &str) -> Result<()>;

    /// Releases the browser. Called once per driver.
    async fn close(&mut self) -> Result<()>;
}

/// Creates a fresh [`Driver`] per session.
#[async_trait]
pub trait Launcher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn Driver>>;
}
