mod credential;
mod envelope;
mod problem;
mod submission;

pub use credential::*;
pub use envelope::*;
pub use problem::*;
pub use submission::*;

pub use url::Url;
