use std::sync::Arc;

use anyhow::Context as _;
use ojspider_webclient::driver::ChromiumLauncher;
use tokio::net::TcpListener;

use super::{GlobalArgs, SubcmdResult};
use crate::{
    config::GlobalConfig,
    print_success,
    server::{self, AppState},
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Listen address [default: from config, 127.0.0.1:5000]
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Answer error envelopes with 4xx/5xx instead of 200
    #[arg(long)]
    pub strict_status_codes: bool,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let mut cfg = GlobalConfig::load(global_args)?;
    args.bind.as_ref().map(|b| cfg.bind = b.clone());
    if args.strict_status_codes {
        cfg.strict_status_codes = true;
    }

    let launcher = Arc::new(ChromiumLauncher::new(cfg.browser_options()));
    let state = AppState::new(launcher, cfg.client_options()?)
        .strict_status_codes(cfg.strict_status_codes);

    let listener = TcpListener::bind(&cfg.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.bind))?;
    server::serve(listener, state, shutdown_signal())
        .await
        .context("Server error")?;

    print_success!("Server on {} stopped", cfg.bind);
    Ok(())
}
