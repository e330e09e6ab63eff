use std::{
    io::{self, Read as _},
    path::PathBuf,
};

use anyhow::Context as _;
use ojspider_webclient::Envelope;

use super::{CredArgs, GlobalArgs, SubcmdResult};
use crate::{config::GlobalConfig, print_success, util};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub pid: u64,

    /// Source file to submit; `-` reads stdin
    #[arg()]
    pub program_file: PathBuf,

    /// Visible text of the language option [default: from config]
    #[arg(short, long)]
    pub language: Option<String>,

    #[command(flatten)]
    pub cred: CredArgs,
}

fn read_answer(path: &PathBuf) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read program from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let mut cfg = GlobalConfig::load(global_args)?;
    if let Some(lang) = &args.language {
        cfg.language = lang.clone();
    }
    let answer = read_answer(&args.program_file)?;
    let cred = args.cred.resolve()?;
    let mut scraper = util::open(&cfg, cred).await?;

    let pid = args.pid.to_string();
    let res = match scraper.login().await {
        Ok(()) => scraper.submit(&pid, &answer).await,
        Err(e) => Err(e),
    };
    util::close(scraper).await;

    util::print_envelope(&Envelope::from(res))?;
    print_success!(
        "Submitted {:?} to problem {}; check it with `ojspider status {}`",
        args.program_file,
        pid,
        pid
    );
    Ok(())
}
