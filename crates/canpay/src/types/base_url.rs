//! Service base URL type.

use std::fmt;

use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated service origin that request paths are appended to.
///
/// The URL must be absolute and use HTTPS (HTTP is allowed for localhost).
/// A base may carry a path prefix such as `/api`; trailing slashes are
/// dropped so joining with `/users/login` never yields `//`.
///
/// # Example
///
/// ```
/// use canpay::BaseUrl;
///
/// let base = BaseUrl::new("https://api.canpayment.work/api/").unwrap();
/// assert_eq!(base.join("/users/login"), "https://api.canpayment.work/api/users/login");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Parse and validate a base URL.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::BaseUrl`] if the string is not an
    /// absolute HTTPS (or local HTTP) URL without query or fragment.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| invalid(s, e.to_string()))?;

        let local = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));
        match url.scheme() {
            "https" => {}
            "http" if local => {}
            _ => return Err(invalid(s, "must use HTTPS (HTTP allowed only for localhost)")),
        }
        if url.host_str().is_none() {
            return Err(invalid(s, "must have a host"));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid(s, "must not contain a query or fragment"));
        }

        Ok(Self(url))
    }

    /// Returns the absolute URL for a path relative to this base.
    ///
    /// `path` is appended verbatim, so it may include a query string.
    pub fn join(&self, path: &str) -> String {
        let base = self.as_str().trim_end_matches('/');
        match path.strip_prefix('/') {
            Some(rest) => format!("{base}/{rest}"),
            None => format!("{base}/{path}"),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }
}

fn invalid(value: &str, reason: impl Into<String>) -> Error {
    InvalidInputError::BaseUrl {
        value: value.to_string(),
        reason: reason.into(),
    }
    .into()
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let base = BaseUrl::new("https://api.canpayment.work/api").unwrap();
        assert_eq!(base.host(), Some("api.canpayment.work"));
    }

    #[test]
    fn valid_localhost_http() {
        let base = BaseUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(base.join("/wallets/mona"), "http://127.0.0.1:8080/wallets/mona");
    }

    #[test]
    fn join_keeps_path_prefix() {
        let base = BaseUrl::new("https://api.canpayment.work/api").unwrap();
        assert_eq!(
            base.join("/payments/inv42"),
            "https://api.canpayment.work/api/payments/inv42"
        );
    }

    #[test]
    fn join_normalizes_trailing_slash() {
        let base = BaseUrl::new("https://api.canpayment.work/api/").unwrap();
        assert_eq!(
            base.join("/card_tokens"),
            "https://api.canpayment.work/api/card_tokens"
        );
        assert_eq!(
            base.join("bank_accounts"),
            "https://api.canpayment.work/api/bank_accounts"
        );
    }

    #[test]
    fn join_keeps_query_string() {
        let base = BaseUrl::new("https://api.canpayment.work/api").unwrap();
        assert_eq!(
            base.join("/payments/history/mona?paidOnly=1"),
            "https://api.canpayment.work/api/payments/history/mona?paidOnly=1"
        );
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(BaseUrl::new("http://api.canpayment.work/api").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(BaseUrl::new("/api").is_err());
    }

    #[test]
    fn rejects_query_and_fragment() {
        assert!(BaseUrl::new("https://api.canpayment.work/api?x=1").is_err());
        assert!(BaseUrl::new("https://api.canpayment.work/api#top").is_err());
    }

    #[test]
    fn rejects_other_schemes() {
        let err = BaseUrl::new("ftp://localhost/api").unwrap_err();
        assert!(err.to_string().contains("HTTPS"));
    }
}
