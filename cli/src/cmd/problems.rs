use ojspider_webclient::{Credentials, Envelope};

use super::{GlobalArgs, SubcmdResult};
use crate::{config::GlobalConfig, util};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Problem set page, 1 to 25
    #[arg(default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = GlobalConfig::load(global_args)?;
    let scraper = util::open(&cfg, Credentials::anonymous()).await?;

    let res = scraper.get_problems(args.page).await;
    util::close(scraper).await;

    util::print_envelope(&Envelope::from(res))
}
