use ojspider_webclient::{Credentials, Envelope};

use super::{GlobalArgs, SubcmdResult};
use crate::{config::GlobalConfig, util};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub pid: u64,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = GlobalConfig::load(global_args)?;
    let scraper = util::open(&cfg, Credentials::anonymous()).await?;

    let res = scraper.get_problem(&args.pid.to_string()).await;
    util::close(scraper).await;

    util::print_envelope(&Envelope::from(res))
}
