use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt as _;
use tokio::task::JoinHandle;

use super::{Driver, Launcher};
use crate::{error::*, model::Url};

#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub headless: bool,
    /// Chrome/Chromium/Edge binary; auto-detected when `None`
    pub executable: Option<PathBuf>,
    pub args: Vec<String>,
    /// Interval between element lookups while waiting
    pub poll_interval: Duration,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
            args: vec![
                "--disable-gpu".to_owned(),
                "--no-sandbox".to_owned(),
                "--disable-dev-shm-usage".to_owned(),
            ],
            poll_interval: Duration::from_millis(100),
        }
    }
}

/// Single-tab [`Driver`] over a Chromium process launched through CDP.
pub struct ChromiumDriver {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    poll_interval: Duration,
}

impl ChromiumDriver {
    pub async fn launch(opts: &BrowserOptions) -> Result<Self> {
        let mut builder = BrowserConfig::builder().args(&opts.args);
        if !opts.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &opts.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(Error::BrowserConfig)?;

        let (browser, mut handler) = Browser::launch(config).await?;
        log::debug!("Browser launched (headless: {})", opts.headless);

        // CDP events must be drained for any page command to make progress
        let handler = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        Ok(Self {
            browser,
            page,
            handler,
            poll_interval: opts.poll_interval,
        })
    }

    async fn find(&self, selector: &str) -> Result<Element> {
        self.page
            .find_element(selector)
            .await
            .map_err(|_| Error::NoSuchElement(selector.to_owned()))
    }
}

#[async_trait]
impl Driver for ChromiumDriver {
    async fn goto(&self, url: &Url) -> Result<()> {
        log::debug!("GET {}", url);
        self.page
            .goto(url.as_str())
            .await
            .map_err(|e| Error::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<()> {
        let poll = async {
            loop {
                if self.page.find_element(selector).await.is_ok() {
                    return;
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        };
        tokio::time::timeout(timeout, poll)
            .await
            .map_err(|_| Error::Timeout {
                selector: selector.to_owned(),
            })
    }

    async fn outer_html(&self, selector: &str) -> Result<String> {
        let el = self.find(selector).await?;
        el.outer_html()
            .await?
            .ok_or_else(|| Error::NoSuchElement(selector.to_owned()))
    }

    async fn texts(&self, selector: &str) -> Result<Vec<String>> {
        // no match is Ok(vec![]); an Err means the DOM query itself failed
        let elements = self.page.find_elements(selector).await?;
        let mut texts = Vec::with_capacity(elements.len());
        for el in elements {
            texts.push(el.inner_text().await?.unwrap_or_default());
        }
        Ok(texts)
    }

    async fn type_into(&self, selector: &str, text: &str) -> Result<()> {
        let el = self.find(selector).await?;
        el.click().await?.type_str(text).await?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.find(selector).await?.click().await?;
        Ok(())
    }

    async fn select_option_by_text(&self, selector: &str, text: &str) -> Result<()> {
        let script = format!(
            r#"
            (() => {{
                const select = document.querySelector({sel});
                if (!select) return false;
                const option = Array.from(select.options).find(o => o.text === {text});
                if (!option) return false;
                select.value = option.value;
                select.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()
            "#,
            sel = serde_json::to_string(selector)?,
            text = serde_json::to_string(text)?,
        );
        let selected: bool = self.page.evaluate(script).await?.into_value()?;
        if !selected {
            return Err(Error::NoSuchElement(format!(
                "{} > option[text={:?}]",
                selector, text
            )));
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.browser.close().await?;
        if let Err(e) = self.browser.wait().await {
            log::warn!("Failed to wait for browser exit: {}", e);
        }
        self.handler.abort();
        log::debug!("Browser closed");
        Ok(())
    }
}

/// Launches one headless Chromium per session.
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    pub options: BrowserOptions,
}

impl ChromiumLauncher {
    pub fn new(options: BrowserOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Launcher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn Driver>> {
        let driver = ChromiumDriver::launch(&self.options).await?;
        Ok(Box::new(driver))
    }
}
