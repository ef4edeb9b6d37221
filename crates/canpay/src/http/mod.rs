//! HTTP plumbing: request descriptors and the authenticated pipeline.

mod pipeline;
mod request;

pub use pipeline::RequestPipeline;
pub use request::ApiRequest;

use serde_json::Value;
use tracing::trace;

use crate::error::{Error, TransportError};

/// Turn a response into its JSON body, or a transport error for any
/// non-success status or unreadable body.
///
/// An empty success body reads as `null`.
pub(crate) async fn read_json(response: reqwest::Response) -> Result<Value, Error> {
    let status = response.status();
    trace!(status = %status, "API response");

    if !status.is_success() {
        let body = response.text().await?;
        return Err(TransportError::Status {
            status: status.as_u16(),
            body,
        }
        .into());
    }

    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&bytes).map_err(|e| {
        TransportError::Decode {
            message: e.to_string(),
        }
        .into()
    })
}
