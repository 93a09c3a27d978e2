use ipo_spider::{Config, Pipeline};
use tracing::{debug, info, trace};

/// Load the configuration and run one IPO digest.
///
/// Configuration is resolved before anything touches the network, so a missing credential
/// fails the run without fetching or sending.
pub(crate) async fn run() -> anyhow::Result<()> {
    trace!("reading configuration ...");
    let config = Config::from_env()?;
    debug!("configuration loaded: {config:?}");

    let time = std::time::Instant::now();
    let pipeline = Pipeline::from_config(&config)?;
    let report = pipeline.run(&config).await?;

    info!(
        "IPO digest as of {} sent with {} IPOs, time elapsed: {:?}",
        report.as_of(),
        report.records.len(),
        time.elapsed()
    );

    Ok(())
}
