use std::time::Duration;

use async_trait::async_trait;

use super::client::HttpClient;

/// Plain [`HttpClient`] over [`reqwest::Client`], with explicit request and
/// connect timeouts so a hanging upstream fails the call instead of stalling
/// the refresh loop.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new(timeout: Duration, connect_timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self(client))
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
