use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::*;

pub fn parse_url(url: impl AsRef<str>) -> Result<Url> {
    match Url::parse(url.as_ref()) {
        Ok(url) => Ok(url),
        Err(e) => Err(Error::InvalidSyntaxUrl {
            url: url.as_ref().to_owned(),
            source: e,
        }),
    }
}

pub fn selector_must_parsed(sel: &'static str) -> Selector {
    Selector::parse(sel).expect("Failed to parse  `&'static str`  selector")
}

/// Trim both ends and drop every embedded `'\n'`.
/// Other whitespace is kept as is, so this is idempotent.
pub fn clean_text(s: &str) -> String {
    s.trim().replace('\n', "")
}

pub trait DocExt {
    fn select_first(&self, sel: &'static str) -> Result<ElementRef>;
    fn select_opt(&self, sel: &'static str) -> Option<ElementRef>;
}

impl DocExt for Html {
    fn select_first(&self, sel: &'static str) -> Result<ElementRef> {
        self.select_opt(sel)
            .ok_or_else(|| Error::NoSuchElement(sel.to_owned()))
    }

    fn select_opt(&self, sel: &'static str) -> Option<ElementRef> {
        let selector = self::selector_must_parsed(sel);
        self.select(&selector).next()
    }
}

impl<'a> DocExt for ElementRef<'a> {
    fn select_first(&self, sel: &'static str) -> Result<ElementRef> {
        self.select_opt(sel)
            .ok_or_else(|| Error::NoSuchElement(sel.to_owned()))
    }

    fn select_opt(&self, sel: &'static str) -> Option<ElementRef> {
        let selector = self::selector_must_parsed(sel);
        self.select(&selector).next()
    }
}

pub trait ElementRefExt {
    /// Concatenation of every descendant text node.
    fn all_text(&self) -> String;

    fn trimmed_text(&self) -> String {
        self.all_text().trim().to_owned()
    }

    fn cleaned_text(&self) -> String {
        self::clean_text(&self.all_text())
    }
}

impl<'a> ElementRefExt for ElementRef<'a> {
    fn all_text(&self) -> String {
        self.text().collect()
    }
}
