use async_trait::async_trait;
use log::debug;
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;

use super::Transport;
use crate::error::{Result, ShellError};

/// HTTP transport with connection pooling. Relative URLs are resolved
/// against the base URL given at construction.
pub struct HttpTransport {
    base_url: Url,
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("officeui/0.1")
            .build()
            .map_err(|e| ShellError::transport(base_url, e))?;

        Self::with_custom_client(base_url, http_client)
    }

    /// Create a transport around an already configured client
    pub fn with_custom_client(base_url: &str, http_client: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ShellError::transport(base_url, e))?;
        Ok(Self {
            base_url,
            http_client,
        })
    }

    pub fn resolve(&self, url: &str) -> Result<Url> {
        self.base_url
            .join(url)
            .map_err(|e| ShellError::transport(url, e))
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let target = self.resolve(url)?;
        debug!("GET {}", target);

        let response = self
            .http_client
            .get(target)
            .send()
            .await
            .map_err(|e| ShellError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShellError::transport(url, format!("HTTP {}", status)));
        }
        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let response = self.get(url).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| ShellError::transport(url, e))
    }

    async fn load_resource(&self, url: &str) -> Result<()> {
        let response = self.get(url).await?;
        response
            .bytes()
            .await
            .map(|_| ())
            .map_err(|e| ShellError::transport(url, e))
    }
}
