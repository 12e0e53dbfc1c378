use crate::CardError;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Configuration for the outbound HTTP client.
///
/// `timeout` is `None` by default: a hung remote server stalls only the
/// request that hit it. Deployments that prefer bounded waits can set one.
pub struct FetcherConfig {
    pub user_agent: String,
    pub timeout: Option<Duration>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: "linkcard/0.1.0".to_string(),
            timeout: None,
        }
    }
}

#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher {
    pub fn new() -> Self {
        debug!("Fetcher initialized with default configuration");
        Self::new_with_config(FetcherConfig::default())
    }

    pub fn new_with_config(config: FetcherConfig) -> Self {
        let mut builder = Client::builder()
            .user_agent(config.user_agent)
            .pool_max_idle_per_host(10);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().unwrap_or_else(|e| {
            error!(error = %e, "Failed to create HTTP client");
            panic!("Failed to initialize HTTP client: {}", e);
        });
        Fetcher { client }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch the document body at `url`.
    ///
    /// Every transport-level failure maps uniformly to `FetchError`; a non-2xx
    /// response is not distinguished here, its body is returned and left to
    /// the extractor to reject.
    #[instrument(level = "debug", skip(self), err)]
    pub async fn fetch(&self, url: &str) -> Result<String, CardError> {
        debug!(url = %url, "Starting fetch request");

        let content = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, url = %url, "Failed to send request");
                CardError::FetchError(e.to_string())
            })?
            .text()
            .await
            .map_err(|e| {
                error!(error = %e, url = %url, "Failed to read response body");
                CardError::FetchError(e.to_string())
            })?;

        debug!(url = %url, content_length = content.len(), "Successfully fetched document");
        Ok(content)
    }
}
