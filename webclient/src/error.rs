pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("page number too big")]
    PageTooBig(i64),

    #[error("page number too small")]
    PageTooSmall(i64),

    #[error("{field} is required")]
    MissingCredential { field: &'static str },

    #[error("Failed to parse as URL '{url}'")]
    InvalidSyntaxUrl {
        url: String,

        #[source]
        source: url::ParseError,
    },

    #[error("request timed out")]
    Timeout { selector: String },

    #[error("No such html element (selector: {0:?})")]
    NoSuchElement(String),

    #[error("expected {expected} content blocks, found {found}")]
    MissingContentBlocks { expected: usize, found: usize },

    #[error("no results")]
    NoResults,

    #[error("Unexpected text '{text}' in {field}")]
    Malformed { field: &'static str, text: String },

    #[error("{0}")]
    LoginRejected(String),

    #[error("not logged in")]
    NotLoggedIn,

    #[error("session already shut down")]
    SessionClosed,

    #[error("Failed to navigate to {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("Invalid browser config: {0}")]
    BrowserConfig(String),

    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of [`Error`], for callers that branch on the cause
/// rather than on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Timeout,
    ElementNotFound,
    EmptyResult,
    Network,
    Unauthenticated,
    Malformed,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error::*;
        match self {
            PageTooBig(_) | PageTooSmall(_) | MissingCredential { .. } | InvalidSyntaxUrl { .. } => {
                ErrorKind::Validation
            }
            Timeout { .. } => ErrorKind::Timeout,
            NoSuchElement(_) | MissingContentBlocks { .. } => ErrorKind::ElementNotFound,
            NoResults => ErrorKind::EmptyResult,
            Malformed { .. } => ErrorKind::Malformed,
            LoginRejected(_) | NotLoggedIn | SessionClosed => ErrorKind::Unauthenticated,
            Navigation { .. } | BrowserConfig(_) | Browser(_) | Json(_) => ErrorKind::Network,
        }
    }
}
