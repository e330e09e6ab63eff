use crate::{error::*, model::Url, util};

pub const DEFAULT_BASE_URL: &str = "http://oj.noi.cn/";

pub const MIN_PAGE: i64 = 1;
pub const MAX_PAGE: i64 = 25;

/// URL builder for every page the client visits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiUrls {
    base: Url,
}

impl Default for NoiUrls {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_BASE_URL).unwrap(),
        }
    }
}

impl NoiUrls {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn parse(base: &str) -> Result<Self> {
        let mut base = util::parse_url(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn home(&self) -> Url {
        self.base.clone()
    }

    pub fn problemset(&self, page: i64) -> Url {
        self.join(&format!("oj/index.php/main/problemset/{}", page))
    }

    pub fn problem(&self, pid: &str) -> Url {
        self.join(&format!("oj/index.php/main/show/{}", pid))
    }

    pub fn submit(&self, pid: &str) -> Url {
        self.join(&format!("oj/index.php/main/submit/{}", pid))
    }

    pub fn status(&self, username: &str, pid: &str) -> Url {
        let mut url = self.join("oj/index.php/main/status");
        url.query_pairs_mut()
            .append_pair("user", username)
            .append_pair("pid", pid);
        url
    }

    fn join(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(&format!("{}{}", self.base.path(), path));
        url
    }
}

/// Rejects listing pages outside `[MIN_PAGE, MAX_PAGE]`.
pub fn check_page(page: i64) -> Result<()> {
    if page > MAX_PAGE {
        return Err(Error::PageTooBig(page));
    }
    if page < MIN_PAGE {
        return Err(Error::PageTooSmall(page));
    }
    Ok(())
}
