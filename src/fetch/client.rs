use async_trait::async_trait;
use reqwest::{Request, Response};

/// Minimal transport seam so the RTPI client can run against a canned
/// transport in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
