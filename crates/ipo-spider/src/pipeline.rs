use crate::calendar::{self, CalendarSource, HttpCalendar, RowExtractor, TableBodyExtractor};
use crate::config::Config;
use crate::error::Result;
use crate::filter::{filter_upcoming, now_in};
use crate::mail::{Dispatcher, SmtpDispatcher};
use crate::report::{Composer, Report};
use chrono::DateTime;
use chrono_tz::Tz;
use tracing::{debug, info};

/// One fetch, filter, compose and send cycle.
///
/// The stages run strictly in order; the first failure ends the run before anything is sent.
pub struct Pipeline<S, E, D> {
    pub source: S,
    pub extractor: E,
    pub dispatcher: D,
}

impl Pipeline<HttpCalendar, TableBodyExtractor, SmtpDispatcher> {
    /// The production pipeline: HTTP calendar, table-body scraping, SMTP delivery.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            source: HttpCalendar::from_config(config)?,
            extractor: TableBodyExtractor::new(),
            dispatcher: SmtpDispatcher::new(config),
        })
    }
}

impl<S, E, D> Pipeline<S, E, D>
where
    S: CalendarSource,
    E: RowExtractor,
    D: Dispatcher,
{
    pub fn new(source: S, extractor: E, dispatcher: D) -> Self {
        Self {
            source,
            extractor,
            dispatcher,
        }
    }

    /// Run the cycle as of the current time in the configured zone.
    pub async fn run(&self, config: &Config) -> Result<Report> {
        self.run_at(config, now_in(&config.timezone)).await
    }

    /// Run the cycle as of `now`; the window starts on `now`'s date.
    pub async fn run_at(&self, config: &Config, now: DateTime<Tz>) -> Result<Report> {
        let time = std::time::Instant::now();

        info!("fetching IPO calendar ...");
        let records = calendar::fetch(&self.source, &self.extractor).await?;
        info!("fetched {} total IPO entries from calendar", records.len());

        let upcoming = filter_upcoming(records, config.days_ahead, now.date_naive());
        info!(
            "found {} IPOs occurring in the next {} days",
            upcoming.len(),
            config.days_ahead
        );

        let report = Composer::new()?.compose(upcoming, config, now)?;
        self.dispatcher.dispatch(&report).await?;

        debug!("IPO digest delivered, {}", crate::time_elapsed(time));
        Ok(report)
    }
}
