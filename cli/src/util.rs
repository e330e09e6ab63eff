use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _};
use ojspider_webclient::{driver::ChromiumLauncher, open_scraper, Credentials, Envelope, Scraper};

use crate::{cmd::SubcmdResult, config::GlobalConfig};

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {
        use ::colored::Colorize as _;
        eprintln!("{}", format!($fmt, $($e)*).green())
    }
}

/// `RUST_LOG` wins unless `-v` was given.
pub fn init_logger(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(log::LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
        }
    }
    builder.init();
}

pub fn replace_homedir_to_tilde(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let Some(home_dir) = ::dirs::home_dir() else {
        return path
    };
    path.strip_prefix(home_dir)
        .map(|path| Path::new("~").join(path))
        .unwrap_or(path)
}

/// Launches the configured browser for a one-shot command.
pub async fn open(cfg: &GlobalConfig, cred: Credentials) -> anyhow::Result<Scraper> {
    let launcher = ChromiumLauncher::new(cfg.browser_options());
    open_scraper(&launcher, cred, cfg.client_options()?)
        .await
        .context("Failed to launch the browser")
}

pub async fn close(mut scraper: Scraper) {
    if let Err(e) = scraper.shutdown().await {
        log::warn!("Failed to close the browser: {}", e);
    }
}

/// Prints the envelope as JSON on stdout; an error envelope fails the command.
pub fn print_envelope(envelope: &Envelope) -> SubcmdResult {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    if !envelope.is_success() {
        bail!("{}", envelope.msg);
    }
    Ok(())
}
