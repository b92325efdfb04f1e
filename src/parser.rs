//! JSON parser for RTPI realtime-bus-information responses.

use serde::Deserialize;

use crate::error::ProviderError;

/// Top-level RTPI response envelope. Unknown fields (timestamps, stop
/// metadata, and so on) are ignored.
#[derive(Debug, Deserialize)]
pub struct RtpiResponse {
    pub errorcode: String,
    #[serde(default)]
    pub errormessage: String,
    #[serde(default)]
    pub results: Vec<RtpiResult>,
}

/// One raw arrival row. `duetime` and `route` are optional here so a
/// malformed row can be reported instead of silently defaulted.
#[derive(Debug, Deserialize)]
pub struct RtpiResult {
    pub duetime: Option<String>,
    pub route: Option<String>,
}

/// Decodes a JSON-encoded RTPI [`RtpiResponse`] from raw bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON for the RTPI envelope.
pub fn parse_response(bytes: &[u8]) -> Result<RtpiResponse, ProviderError> {
    Ok(serde_json::from_slice(bytes)?)
}
