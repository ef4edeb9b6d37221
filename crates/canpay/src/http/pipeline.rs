//! Authenticated request pipeline for the main API.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::auth::SessionState;
use crate::error::{Error, InvalidInputError};
use crate::types::BaseUrl;

use super::{ApiRequest, read_json};

/// Sends [`ApiRequest`]s to the base endpoint with the session's access token.
///
/// Each dispatch is exactly one HTTP request. There is no queue, no retry
/// and no interpretation of status codes beyond success or failure.
#[derive(Debug, Clone)]
pub struct RequestPipeline {
    client: reqwest::Client,
    base: BaseUrl,
    session: Arc<SessionState>,
}

impl RequestPipeline {
    pub fn new(client: reqwest::Client, base: BaseUrl, session: Arc<SessionState>) -> Self {
        Self {
            client,
            base,
            session,
        }
    }

    /// Returns the base endpoint this pipeline targets.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base
    }

    /// Returns the session state whose access token is attached to requests.
    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    /// Issue one request and return the JSON response body unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthenticated`] if the request needs a session and no
    ///   access token is held. Nothing is sent in that case.
    /// - [`Error::Transport`] for connection failures, timeouts and
    ///   non-success statuses.
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn dispatch(&self, request: &ApiRequest) -> Result<Value, Error> {
        let token = self.session.access_token().await;
        let token = token.as_ref().map(|t| t.as_str()).unwrap_or_default();

        if !request.allow_anonymous() && token.is_empty() {
            return Err(Error::Unauthenticated);
        }

        let url = self.base.join(request.path());
        debug!(%url, "API request");

        let mut builder = self
            .client
            .request(request.method().clone(), &url)
            .headers(auth_headers(token)?);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        read_json(response).await
    }
}

/// Headers sent on every main-API request.
///
/// The token goes in raw, without a scheme prefix, and is empty when the
/// client holds none.
fn auth_headers(token: &str) -> Result<HeaderMap, Error> {
    let mut auth_value =
        HeaderValue::from_str(token).map_err(|_| InvalidInputError::HeaderValue)?;
    auth_value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth_value);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}
