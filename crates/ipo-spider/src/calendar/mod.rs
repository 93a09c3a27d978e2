use crate::error::Result;
use serde::Serialize;
use tracing::{debug, trace};

mod source;
mod table;

pub use source::HttpCalendar;
pub use table::TableBodyExtractor;

/// Stand-in for a revenue column the calendar does not report.
pub const REVENUE_PLACEHOLDER: &str = "-";

/// Rows with fewer cells than this are not IPO listings.
pub const MIN_CELLS: usize = 8;

/// One row of the IPO calendar, every field kept as the text shown on the page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IpoRecord {
    pub date: String,
    pub symbol: String,
    pub company: String,
    pub exchange: String,
    pub price_range: String,
    pub shares_offered: String,
    pub deal_size: String,
    pub market_cap: String,
    pub revenue: String,
}

impl IpoRecord {
    /// Map a row's cell text positionally onto a record; `None` for rows shorter than
    /// [`MIN_CELLS`].
    pub fn from_cells(cells: Vec<String>) -> Option<Self> {
        if cells.len() < MIN_CELLS {
            return None;
        }

        let mut cells = cells.into_iter();
        let mut next = || cells.next().unwrap_or_default();
        Some(Self {
            date: next(),
            symbol: next(),
            company: next(),
            exchange: next(),
            price_range: next(),
            shares_offered: next(),
            deal_size: next(),
            market_cap: next(),
            revenue: cells
                .next()
                .unwrap_or_else(|| REVENUE_PLACEHOLDER.to_string()),
        })
    }
}

/// Turns a calendar page into rows of trimmed cell text, in page order.
///
/// This is the only place that knows about the page's markup; swap the implementation when
/// the upstream layout changes.
pub trait RowExtractor {
    fn extract_rows(&self, html: &str) -> Result<Vec<Vec<String>>>;
}

/// Somewhere the raw calendar page can be read from.
#[allow(async_fn_in_trait)]
pub trait CalendarSource {
    async fn fetch_page(&self) -> Result<String>;
}

/// Extract every IPO listing from `html`, skipping rows that are too short.
pub fn parse_calendar(html: &str, extractor: &impl RowExtractor) -> Result<Vec<IpoRecord>> {
    let rows = extractor.extract_rows(html)?;
    let total = rows.len();

    let records: Vec<IpoRecord> = rows
        .into_iter()
        .filter_map(|cells| {
            let len = cells.len();
            let record = IpoRecord::from_cells(cells);
            if record.is_none() {
                trace!("skipping calendar row with {len} cells");
            }
            record
        })
        .collect();

    debug!("parsed {} IPO entries from {total} calendar rows", records.len());
    Ok(records)
}

/// Fetch the calendar page from `source` and extract its IPO listings.
pub async fn fetch(
    source: &impl CalendarSource,
    extractor: &impl RowExtractor,
) -> Result<Vec<IpoRecord>> {
    let html = source.fetch_page().await?;
    parse_calendar(&html, extractor)
}
