//! Error taxonomy for the upstream arrivals provider.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RTPI endpoint returned status {status}")]
    BadStatus { status: reqwest::StatusCode },

    #[error("invalid RTPI request URL: {0}")]
    InvalidUrl(String),

    #[error("RTPI response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("RTPI error {code}: {message}")]
    Api { code: String, message: String },

    #[error("RTPI result {index} is missing the {field:?} field")]
    MissingField { index: usize, field: &'static str },
}
