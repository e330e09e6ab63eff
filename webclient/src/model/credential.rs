use std::fmt;

use crate::error::*;

/// Login credentials for one judge account.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new<S1, S2>(username: S1, password: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Placeholder for sessions that only read public pages and never log in.
    pub fn anonymous() -> Self {
        Self::new("", "")
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Both fields must be non-empty before anything is typed into the login form.
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(Error::MissingCredential { field: "username" });
        }
        if self.password.is_empty() {
            return Err(Error::MissingCredential { field: "password" });
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validate_rejects_empty_fields() {
        assert!(Credentials::new("alice", "secret").validate().is_ok());
        assert!(matches!(
            Credentials::new("", "secret").validate(),
            Err(Error::MissingCredential { field: "username" })
        ));
        assert!(matches!(
            Credentials::new("alice", "").validate(),
            Err(Error::MissingCredential { field: "password" })
        ));
    }

    #[test]
    fn debug_hides_password() {
        let s = format!("{:?}", Credentials::new("alice", "secret"));
        assert!(s.contains("alice"));
        assert!(!s.contains("secret"));
    }
}
