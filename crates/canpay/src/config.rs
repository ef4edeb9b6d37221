//! Client configuration.

use std::time::Duration;

use crate::error::Error;
use crate::types::BaseUrl;

/// Production API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.canpayment.work/api";

/// Monacoin insight API origin used by the deposit-history helpers.
pub const DEFAULT_INSIGHT_URL: &str = "https://mona.insight.monaco-ex.org/insight-api-monacoin";

/// Settings for a [`Client`](crate::Client).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use canpay::{BaseUrl, ClientConfig};
///
/// let config = ClientConfig::default()
///     .with_base_url(BaseUrl::new("http://localhost:3000/api").unwrap())
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.base_url.as_str(), "http://localhost:3000/api");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin for every authenticated and credential request.
    pub base_url: BaseUrl,
    /// Origin of the block-explorer service.
    pub insight_url: BaseUrl,
    /// Per-request timeout handed to the HTTP client. `None` waits forever.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_insight_url(mut self, insight_url: BaseUrl) -> Self {
        self.insight_url = insight_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the HTTP client shared by the main and insight endpoints.
    pub(crate) fn http_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.as_str());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::new(DEFAULT_BASE_URL).expect("default base URL is valid"),
            insight_url: BaseUrl::new(DEFAULT_INSIGHT_URL).expect("default insight URL is valid"),
            timeout: None,
            user_agent: concat!("canpay/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
