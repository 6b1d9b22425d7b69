use reqwest::StatusCode;
use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure of a single store operation.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid store url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request never produced a response (connect, DNS, timeout, reset).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned {status}")]
    Status {
        method: &'static str,
        url: String,
        status: StatusCode,
    },

    /// The response body was not the JSON we expected.
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
