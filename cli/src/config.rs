use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use ojspider_webclient::{
    driver::BrowserOptions,
    noi::{NoiUrls, DEFAULT_BASE_URL, DEFAULT_LANGUAGE},
    ClientOptions,
};

use crate::{cmd::GlobalArgs, util};

pub const APP_NAME: &str = "ojspider";
pub const ENV_PREFIX: &str = "OJSPIDER_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub base_url: String,
    /// Listen address of `ojspider serve`
    pub bind: String,
    pub headless: bool,
    pub chrome_executable: Option<PathBuf>,
    pub page_timeout_ms: u64,
    pub editor_timeout_ms: u64,
    pub login_settle_delay_ms: u64,
    pub login_check_delay_ms: u64,
    /// Visible text of the submit language option
    pub language: String,
    /// Map error kinds to 4xx/5xx instead of answering every envelope with 200
    pub strict_status_codes: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            base_url: DEFAULT_BASE_URL.to_owned(),
            bind: "127.0.0.1:5000".to_owned(),
            headless: true,
            chrome_executable: None,
            page_timeout_ms: 10_000,
            editor_timeout_ms: 5_000,
            login_settle_delay_ms: 1_000,
            login_check_delay_ms: 500,
            language: DEFAULT_LANGUAGE.to_owned(),
            strict_status_codes: false,
        }
    }
}

/// `OJSPIDER_*` variables; only the ones present override the file.
#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    base_url: Option<String>,
    bind: Option<String>,
    headless: Option<bool>,
    chrome_executable: Option<PathBuf>,
    page_timeout_ms: Option<u64>,
    editor_timeout_ms: Option<u64>,
    login_settle_delay_ms: Option<u64>,
    login_check_delay_ms: Option<u64>,
    language: Option<String>,
    strict_status_codes: Option<bool>,
}

impl GlobalConfig {
    pub const FILENAME: &str = "ojspider.toml";

    pub fn filepath() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(Self::FILENAME))
    }

    /// A missing file is not an error; a malformed one is.
    pub fn from_file_or_default(path: &Path) -> anyhow::Result<Self> {
        let toml_str = match File::open(path).and_then(io::read_to_string) {
            Ok(toml) => toml,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(GlobalConfig::default()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!(
                        "Failed to read config '{}'",
                        util::replace_homedir_to_tilde(path).display()
                    )
                })
            }
        };
        Self::from_toml(&toml_str).with_context(|| {
            format!(
                "Invalid config '{}'",
                util::replace_homedir_to_tilde(path).display()
            )
        })
    }

    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_env(self) -> anyhow::Result<Self> {
        let vars = envy::prefixed(ENV_PREFIX)
            .from_env::<EnvOverrides>()
            .context("Invalid OJSPIDER_* environment variable")?;
        Ok(self.with_overrides(vars))
    }

    fn with_overrides(mut self, o: EnvOverrides) -> Self {
        let EnvOverrides {
            base_url,
            bind,
            headless,
            chrome_executable,
            page_timeout_ms,
            editor_timeout_ms,
            login_settle_delay_ms,
            login_check_delay_ms,
            language,
            strict_status_codes,
        } = o;

        base_url.map(|v| self.base_url = v);
        bind.map(|v| self.bind = v);
        headless.map(|v| self.headless = v);
        chrome_executable.map(|v| self.chrome_executable = Some(v));
        page_timeout_ms.map(|v| self.page_timeout_ms = v);
        editor_timeout_ms.map(|v| self.editor_timeout_ms = v);
        login_settle_delay_ms.map(|v| self.login_settle_delay_ms = v);
        login_check_delay_ms.map(|v| self.login_check_delay_ms = v);
        language.map(|v| self.language = v);
        strict_status_codes.map(|v| self.strict_status_codes = v);
        self
    }

    pub fn with_args(mut self, args: &GlobalArgs) -> Self {
        let GlobalArgs {
            subcmd: _,
            config: _,
            verbose: _,
            base_url,
            show_browser,
            chrome,
        } = args;

        base_url.as_ref().map(|u| self.base_url = u.clone());
        chrome.as_ref().map(|p| self.chrome_executable = Some(p.clone()));
        if *show_browser {
            self.headless = false;
        }
        self
    }

    /// File, then `OJSPIDER_*` variables, then command line flags.
    pub fn load(args: &GlobalArgs) -> anyhow::Result<Self> {
        let file_cfg = match args.config.clone().or_else(Self::filepath) {
            Some(path) => Self::from_file_or_default(&path)?,
            None => {
                log::warn!("Failed to get user's config dir path; using defaults");
                GlobalConfig::default()
            }
        };
        Ok(file_cfg.with_env()?.with_args(args))
    }

    pub fn client_options(&self) -> anyhow::Result<ClientOptions> {
        let urls = NoiUrls::parse(&self.base_url)
            .with_context(|| format!("Invalid base_url {:?}", self.base_url))?;
        Ok(ClientOptions {
            urls,
            page_timeout: Duration::from_millis(self.page_timeout_ms),
            editor_timeout: Duration::from_millis(self.editor_timeout_ms),
            login_settle_delay: Duration::from_millis(self.login_settle_delay_ms),
            login_check_delay: Duration::from_millis(self.login_check_delay_ms),
            language: self.language.clone(),
        })
    }

    pub fn browser_options(&self) -> BrowserOptions {
        BrowserOptions {
            headless: self.headless,
            executable: self.chrome_executable.clone(),
            ..Default::default()
        }
    }
}
