pub mod calendar;
pub mod config;
pub mod error;
pub mod filter;
pub mod mail;
pub mod pipeline;
pub mod report;

pub use config::{Config, ConfigError};
pub use error::{Result, SpiderError};
pub use pipeline::Pipeline;

/// Shortcut for required HTTP elements.
pub(crate) mod http {
    pub(crate) use reqwest::Client as HttpClient;
}

/// Build the HTTP client shared by every request of a run; carries the configured
/// User-Agent and the request timeout.
pub(crate) fn std_client_build(config: &Config) -> Result<http::HttpClient> {
    reqwest::ClientBuilder::new()
        .user_agent(&config.user_agent)
        .timeout(config.http_timeout)
        .build()
        .map_err(|source| SpiderError::Network {
            url: config.calendar_url.clone(),
            source,
        })
}

/// Formats the time elapsed since `time` for trace/debug output.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:.3?}", time.elapsed())
}
