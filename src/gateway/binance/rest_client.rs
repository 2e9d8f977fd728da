//! Binance REST API client.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::DashboardConfig;
use crate::error::FetchError;

/// REST API client for the public Binance market data endpoints
#[derive(Debug, Clone)]
pub struct BinanceRestClient {
    /// HTTP client
    client: Client,
    /// Base URL
    host: Url,
}

impl BinanceRestClient {
    /// Create a client for the configured host, timeout and proxy
    pub fn new(config: &DashboardConfig) -> Result<Self, FetchError> {
        let host = Url::parse(&config.rest_host)?;
        let timeout = Duration::from_secs(config.request_timeout_secs);

        let mut builder = Client::builder().timeout(timeout);
        if let Some(proxy_url) = config.proxy_url() {
            match reqwest::Proxy::all(&proxy_url) {
                Ok(proxy) => {
                    info!("REST client using proxy {}", proxy_url);
                    builder = builder.proxy(proxy);
                }
                Err(e) => {
                    warn!("Ignoring invalid proxy {}: {}", proxy_url, e);
                }
            }
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, host })
    }

    /// Wrap an already configured HTTP client
    pub fn with_client(client: Client, host: Url) -> Self {
        Self { client, host }
    }

    /// Build request URL with query parameters, keeping their order
    fn build_url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, FetchError> {
        let mut url = self.host.join(path)?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Send a GET request and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = self.build_url(path, params)?;
        debug!("Binance API request: GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Binance API rate limit hit: {}", text);
            return Err(FetchError::RateLimited { body: text });
        }
        if !status.is_success() {
            error!("Binance API error {}: {}", status, text);
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}
