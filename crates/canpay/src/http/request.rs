//! Request descriptor.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, InvalidInputError};

/// One call against the main API: method, path, optional JSON body, and
/// whether it may run without an access token.
///
/// Built per call and dropped after dispatch. Descriptors require a session
/// unless [`ApiRequest::anonymous`] is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<Value>,
    allow_anonymous: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            allow_anonymous: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        let value = serde_json::to_value(body).map_err(|e| InvalidInputError::Other {
            message: format!("request body is not serializable: {e}"),
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Let the request run without an access token.
    pub fn anonymous(mut self) -> Self {
        self.allow_anonymous = true;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the base endpoint, including any query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn allow_anonymous(&self) -> bool {
        self.allow_anonymous
    }
}
