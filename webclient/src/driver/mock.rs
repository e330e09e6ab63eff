//! Scriptable in-memory [`Driver`] that records every call.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use async_trait::async_trait;

use super::{Driver, Launcher};
use crate::{error::*, model::Url};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Goto(String),
    WaitFor(String),
    OuterHtml(String),
    Texts(String),
    TypeInto(String, String),
    Click(String),
    SelectOption(String, String),
    Close,
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

/// A page whose content does not change with navigation: a selector is
/// "present" if it was registered through one of the `with_*` builders.
#[derive(Debug, Default)]
pub struct MockDriver {
    html: HashMap<String, String>,
    texts: HashMap<String, Vec<String>>,
    elements: HashSet<String>,
    options: HashMap<String, Vec<String>>,
    fail_goto: Option<String>,
    fail_texts: Option<String>,
    goto_delay: Duration,
    calls: CallLog,
}

fn lock(log: &CallLog) -> MutexGuard<'_, Vec<Call>> {
    log.lock().unwrap_or_else(|e| e.into_inner())
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_html(mut self, selector: &str, html: &str) -> Self {
        self.html.insert(selector.to_owned(), html.to_owned());
        self
    }

    pub fn with_texts<I, S>(mut self, selector: &str, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.texts
            .insert(selector.to_owned(), texts.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_element(mut self, selector: &str) -> Self {
        self.elements.insert(selector.to_owned());
        self
    }

    pub fn with_options<I, S>(mut self, selector: &str, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options
            .insert(selector.to_owned(), options.into_iter().map(Into::into).collect());
        self
    }

    /// Every navigation fails with `message`.
    pub fn failing_goto(mut self, message: &str) -> Self {
        self.fail_goto = Some(message.to_owned());
        self
    }

    /// Every `texts` lookup fails with `message`, like a DOM query racing a navigation.
    pub fn failing_texts(mut self, message: &str) -> Self {
        self.fail_texts = Some(message.to_owned());
        self
    }

    /// Each navigation takes `delay` after it was recorded, so overlapping
    /// callers would show up interleaved in the call log.
    pub fn with_goto_delay(mut self, delay: Duration) -> Self {
        self.goto_delay = delay;
        self
    }

    /// Records into `log` instead of a private log, so drivers handed out by a
    /// [`MockLauncher`] can be observed from the outside.
    pub fn sharing_calls(mut self, log: CallLog) -> Self {
        self.calls = log;
        self
    }

    /// Shared handle to the call log; stays valid after the driver is moved.
    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }

    fn record(&self, call: Call) {
        lock(&self.calls).push(call);
    }

    fn current_url(&self) -> String {
        lock(&self.calls)
            .iter()
            .rev()
            .find_map(|c| match c {
                Call::Goto(url) => Some(url.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn is_present(&self, selector: &str) -> bool {
        self.html.contains_key(selector)
            || self.texts.contains_key(selector)
            || self.elements.contains(selector)
            || self.options.contains_key(selector)
    }

    fn ensure_present(&self, selector: &str) -> Result<()> {
        if self.is_present(selector) {
            Ok(())
        } else {
            Err(Error::NoSuchElement(selector.to_owned()))
        }
    }
}

pub fn snapshot(log: &CallLog) -> Vec<Call> {
    lock(log).clone()
}

pub fn navigations(log: &CallLog) -> usize {
    lock(log)
        .iter()
        .filter(|c| matches!(c, Call::Goto(_)))
        .count()
}

#[async_trait]
impl Driver for MockDriver {
    async fn goto(&self, url: &Url) -> Result<()> {
        self.record(Call::Goto(url.to_string()));
        if !self.goto_delay.is_zero() {
            tokio::time::sleep(self.goto_delay).await;
        }
        match &self.fail_goto {
            Some(message) => Err(Error::Navigation {
                url: url.to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    async fn wait_for(&self, selector: &str, _timeout: Duration) -> Result<()> {
        self.record(Call::WaitFor(selector.to_owned()));
        if self.is_present(selector) {
            Ok(())
        } else {
            Err(Error::Timeout {
                selector: selector.to_owned(),
            })
        }
    }

    async fn outer_html(&self, selector: &str) -> Result<String> {
        self.record(Call::OuterHtml(selector.to_owned()));
        self.html
            .get(selector)
            .cloned()
            .ok_or_else(|| Error::NoSuchElement(selector.to_owned()))
    }

    async fn texts(&self, selector: &str) -> Result<Vec<String>> {
        self.record(Call::Texts(selector.to_owned()));
        if let Some(message) = &self.fail_texts {
            return Err(Error::Navigation {
                url: self.current_url(),
                message: message.clone(),
            });
        }
        Ok(self.texts.get(selector).cloned().unwrap_or_default())
    }

    async fn type_into(&self, selector: &str, text: &str) -> Result<()> {
        self.ensure_present(selector)?;
        self.record(Call::TypeInto(selector.to_owned(), text.to_owned()));
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.ensure_present(selector)?;
        self.record(Call::Click(selector.to_owned()));
        Ok(())
    }

    async fn select_option_by_text(&self, selector: &str, text: &str) -> Result<()> {
        let found = self
            .options
            .get(selector)
            .map_or(false, |opts| opts.iter().any(|o| o == text));
        if !found {
            return Err(Error::NoSuchElement(format!(
                "{} > option[text={:?}]",
                selector, text
            )));
        }
        self.record(Call::SelectOption(selector.to_owned(), text.to_owned()));
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.record(Call::Close);
        Ok(())
    }
}

type DriverFactory = dyn Fn() -> MockDriver + Send + Sync;

/// Hands out a new [`MockDriver`] built by `factory` on every launch.
pub struct MockLauncher {
    factory: Box<DriverFactory>,
    launches: Arc<Mutex<usize>>,
}

impl MockLauncher {
    pub fn new(factory: impl Fn() -> MockDriver + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            launches: Arc::default(),
        }
    }

    pub fn launches(&self) -> Arc<Mutex<usize>> {
        self.launches.clone()
    }
}

#[async_trait]
impl Launcher for MockLauncher {
    async fn launch(&self) -> Result<Box<dyn Driver>> {
        *self.launches.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(Box::new((self.factory)()))
    }
}
