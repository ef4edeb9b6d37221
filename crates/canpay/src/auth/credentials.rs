//! Login and registration input types.

use std::fmt;

/// Login credentials for a Canpay account.
///
/// The password is never exposed in Debug output.
///
/// # Example
///
/// ```
/// use canpay::Credentials;
///
/// let creds = Credentials::new("alice@example.com", "hunter2");
/// assert_eq!(creds.email(), "alice@example.com");
/// ```
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Use only when constructing authentication requests.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Details for creating a new account.
///
/// The service logs the new account in immediately, so registering yields
/// the same credentials as [`Credentials`] would.
#[derive(Clone)]
pub struct Registration {
    credentials: Credentials,
    screen_name: String,
}

impl Registration {
    pub fn new(
        email: impl Into<String>,
        screen_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            credentials: Credentials::new(email, password),
            screen_name: screen_name.into(),
        }
    }

    pub fn email(&self) -> &str {
        self.credentials.email()
    }

    pub fn screen_name(&self) -> &str {
        &self.screen_name
    }

    pub(crate) fn password(&self) -> &str {
        self.credentials.password()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.credentials.email)
            .field("screen_name", &self.screen_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
