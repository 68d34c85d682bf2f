use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::types::{ConfigureRequest, ConfigureResponse};

/// Sends the collected sites to the configure endpoint.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ConfigureTransport {
    async fn configure(&self, request: &ConfigureRequest) -> Result<ConfigureResponse>;
}

/// `ConfigureTransport` over HTTP. Uses `fetch` in the browser and hyper natively.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// `endpoint` is resolved against `base`, so `/configure` lands on the base's origin.
    pub fn new(base: &Url, endpoint: &str) -> Result<Self> {
        let endpoint = base.join(endpoint).with_context(|| format!("invalid endpoint `{}` for {}", endpoint, base))?;
        let client = reqwest::Client::builder().build().context("failed to build HTTP client")?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url { &self.endpoint }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ConfigureTransport for HttpTransport {
    async fn configure(&self, request: &ConfigureRequest) -> Result<ConfigureResponse> {
        debug!(endpoint = %self.endpoint, sites = request.sites.len(), "posting configuration");
        let response = self.client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.endpoint))?;
        // The body is read whatever the status; the server reports problems in `error`.
        let status = response.status();
        debug!(%status, "configure responded");
        response.json::<ConfigureResponse>().await.context("response body is not valid JSON")
    }
}
