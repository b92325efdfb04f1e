mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use reqwest::Url;

use crate::error::ProviderError;

pub async fn fetch_bytes<C: HttpClient>(client: &C, url: Url) -> Result<Vec<u8>, ProviderError> {
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client.execute(req).await?;
    if !resp.status().is_success() {
        return Err(ProviderError::BadStatus {
            status: resp.status(),
        });
    }
    Ok(resp.bytes().await?.to_vec())
}
