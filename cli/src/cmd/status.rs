use ojspider_webclient::Envelope;

use super::{CredArgs, GlobalArgs, SubcmdResult};
use crate::{config::GlobalConfig, util};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub pid: u64,

    #[command(flatten)]
    pub cred: CredArgs,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = GlobalConfig::load(global_args)?;
    let cred = args.cred.resolve()?;
    let mut scraper = util::open(&cfg, cred).await?;

    let res = match scraper.login().await {
        Ok(()) => scraper.get_status(&args.pid.to_string()).await,
        Err(e) => Err(e),
    };
    util::close(scraper).await;

    util::print_envelope(&Envelope::from(res))
}
