use crate::{
    driver::Driver,
    error::*,
    model::Credentials,
    util,
};

use super::{markup, options::ClientOptions};

/// A logged-in (or about to be) browser tab on the judge.
///
/// Owns its [`Driver`] exclusively; [`Session::shutdown`] releases it and is
/// safe to call more than once.
pub struct Session {
    cred: Credentials,
    driver: Option<Box<dyn Driver>>,
    authenticated: bool,
    opts: ClientOptions,
}

impl Session {
    pub fn new(cred: Credentials, driver: Box<dyn Driver>, opts: ClientOptions) -> Self {
        Self {
            cred,
            driver: Some(driver),
            authenticated: false,
            opts,
        }
    }

    /// Fills the login form on the home page and checks the second error slot.
    ///
    /// The page always renders one `alert-error` span; a second one only
    /// shows up when the site rejected the credentials.
    pub async fn login(&mut self) -> Result<()> {
        self.cred.validate()?;
        let driver = self.driver()?;

        driver.goto(&self.opts.urls.home()).await?;
        tokio::time::sleep(self.opts.login_settle_delay).await;
        driver
            .wait_for(markup::USERNAME_INPUT, self.opts.page_timeout)
            .await?;
        driver
            .type_into(markup::USERNAME_INPUT, self.cred.username())
            .await?;
        driver
            .type_into(markup::PASSWORD_INPUT, self.cred.password())
            .await?;
        driver.click(markup::REMEMBER_CHECKBOX).await?;
        driver.click(markup::LOGIN_BUTTON).await?;

        tokio::time::sleep(self.opts.login_check_delay).await;

        let errors = driver.texts(markup::LOGIN_ERROR).await?;
        if let Some(msg) = errors.get(1) {
            log::info!("Login rejected for {:?}", self.cred.username());
            return Err(Error::LoginRejected(util::clean_text(msg)));
        }

        self.authenticated = true;
        log::info!("Logged in as {:?}", self.cred.username());
        Ok(())
    }

    /// Closes the browser. Later calls are no-ops.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.authenticated = false;
        match self.driver.take() {
            Some(mut driver) => driver.close().await,
            None => Ok(()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_closed(&self) -> bool {
        self.driver.is_none()
    }

    pub fn username(&self) -> &str {
        self.cred.username()
    }

    pub fn options(&self) -> &ClientOptions {
        &self.opts
    }

    pub fn driver(&self) -> Result<&dyn Driver> {
        self.driver.as_deref().ok_or(Error::SessionClosed)
    }

    pub(crate) fn ensure_authenticated(&self) -> Result<()> {
        self.driver()?;
        if self.authenticated {
            Ok(())
        } else {
            Err(Error::NotLoggedIn)
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.driver.is_some() {
            log::warn!(
                "Session for {:?} dropped without shutdown; the browser is killed without a clean close",
                self.cred.username()
            );
        }
    }
}
