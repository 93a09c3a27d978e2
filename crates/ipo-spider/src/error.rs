use crate::config::ConfigError;

pub type Result<T, E = SpiderError> = std::result::Result<T, E>;

/// Any failure that aborts a run. Row-level defects never surface here; they are skipped
/// where they are found.
#[derive(Debug, thiserror::Error)]
pub enum SpiderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to fetch {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected calendar page structure: {0}")]
    Structure(String),

    #[error("failed to render {template}")]
    Render {
        template: &'static str,
        #[source]
        source: tera::Error,
    },

    #[error("invalid mailbox {address:?}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("failed to build email message")]
    Message(#[from] lettre::error::Error),

    #[error("failed to send email via {host}")]
    Transmission {
        host: String,
        #[source]
        source: lettre::transport::smtp::Error,
    },
}
