use std::time::Duration;

use super::urls::NoiUrls;

pub const DEFAULT_LANGUAGE: &str = "c++";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub urls: NoiUrls,
    /// Bound for the login form, result tables and problem pages to appear
    pub page_timeout: Duration,
    /// Bound for each step of the submit form
    pub editor_timeout: Duration,
    /// Pause after the home page loads, before the login form is touched
    pub login_settle_delay: Duration,
    /// Pause between pressing "login" and reading the error slots
    pub login_check_delay: Duration,
    /// Visible text of the language option picked on submit
    pub language: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            urls: NoiUrls::default(),
            page_timeout: Duration::from_secs(10),
            editor_timeout: Duration::from_secs(5),
            login_settle_delay: Duration::from_secs(1),
            login_check_delay: Duration::from_millis(500),
            language: DEFAULT_LANGUAGE.to_owned(),
        }
    }
}
