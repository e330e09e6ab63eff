pub mod problem;
pub mod problems;
pub mod serve;
pub mod status;
pub mod submit;

use std::path::PathBuf;

use ojspider_webclient::Credentials;

use crate::ui;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// Config file [default: <user config dir>/ojspider/ojspider.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Judge root URL, e.g. a local mirror
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Run the browser with a visible window
    #[arg(long, global = true)]
    pub show_browser: bool,

    /// Chrome/Chromium executable
    #[arg(long, global = true)]
    pub chrome: Option<PathBuf>,

    /// -v: debug, -vv: trace
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    Serve(serve::Args),

    #[command(alias("ls"))]
    Problems(problems::Args),

    #[command(alias("p"))]
    Problem(problem::Args),

    #[command(alias("s"))]
    Submit(submit::Args),

    Status(status::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Serve(args) => serve::exec(args, self).await,
            Problems(args) => problems::exec(args, self).await,
            Problem(args) => problem::exec(args, self).await,
            Submit(args) => submit::exec(args, self).await,
            Status(args) => status::exec(args, self).await,
        }
    }
}

/// Account options shared by the commands that need a login.
#[derive(Debug, clap::Args)]
pub struct CredArgs {
    #[arg(short, long, env = "OJSPIDER_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "OJSPIDER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl CredArgs {
    /// Prompts for whatever was not given on the command line or in the environment.
    pub fn resolve(&self) -> anyhow::Result<Credentials> {
        let username = match &self.username {
            Some(u) => u.clone(),
            None => ui::ask_text("username")?,
        };
        let password = match &self.password {
            Some(p) => p.clone(),
            None => ui::ask_password("password")?,
        };
        Ok(Credentials::new(username, password))
    }
}
