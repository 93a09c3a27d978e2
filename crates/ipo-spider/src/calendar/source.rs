use super::CalendarSource;
use crate::config::Config;
use crate::error::{Result, SpiderError};
use crate::http::HttpClient;
use tracing::{debug, error};

/// The calendar page served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCalendar {
    client: HttpClient,
    url: String,
}

impl HttpCalendar {
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Calendar at the configured URL, read with the configured User-Agent and timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = crate::std_client_build(config)?;
        Ok(Self::new(client, &config.calendar_url))
    }
}

impl CalendarSource for HttpCalendar {
    async fn fetch_page(&self) -> Result<String> {
        let network_error = |source: reqwest::Error| {
            error!("failed to fetch IPO calendar from {}, error({source})", self.url);
            SpiderError::Network {
                url: self.url.clone(),
                source,
            }
        };

        debug!("fetching IPO calendar from {}", self.url);
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(network_error)?
            .text()
            .await
            .map_err(network_error)?;

        debug!("IPO calendar fetched, {} bytes", body.len());
        Ok(body)
    }
}
