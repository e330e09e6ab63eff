// exported modules
pub mod driver;
pub mod error;
pub mod model;

// site impls
pub mod noi;

// re-exports
pub use driver::{Driver, Launcher};
pub use error::*;
pub use model::*;
pub use noi::{ClientOptions, NoiExtractor, Scraper, Session};

/// Launches a browser and wraps it in a not-yet-authenticated [`Scraper`].
pub async fn open_scraper(
    launcher: &dyn Launcher,
    cred: Credentials,
    opts: ClientOptions,
) -> Result<Scraper> {
    let driver = launcher.launch().await?;
    Ok(Scraper::new(Session::new(cred, driver, opts)))
}

// internal modules
mod util;
