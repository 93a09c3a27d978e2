use clap::{Parser, ValueEnum};
use tracing::Level;

/// Email this week's upcoming IPOs from the StockAnalysis calendar.
///
/// Reads GMAIL_USER, GMAIL_PASS, RECIPIENT and, optionally, TIMEZONE and CALENDAR_URL from the
/// environment (or a `.env` file).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Sets the level of tracing.
    #[arg(short, long, default_value = "INFO")]
    pub trace: TraceLevel,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}

impl From<TraceLevel> for Level {
    fn from(level: TraceLevel) -> Self {
        match level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        }
    }
}
