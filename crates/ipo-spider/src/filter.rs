use crate::calendar::IpoRecord;
use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::debug;

/// Format of the calendar's date column, e.g. "Aug 4, 2025".
pub const DATE_FORMAT: &str = "%b %d, %Y";

/// The current instant in `tz`.
pub fn now_in(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Today's date in `tz`.
pub fn today_in(tz: &Tz) -> NaiveDate {
    now_in(tz).date_naive()
}

/// Parse a calendar date such as "Aug 4, 2025"; `None` when it is not a single concrete day.
pub fn parse_listing_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()
}

/// Last day of a window starting `today` and spanning `days_ahead` more days.
pub fn window_end(today: NaiveDate, days_ahead: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(days_ahead.into()))
        .unwrap_or(NaiveDate::MAX)
}

/// Keep the records listing between `today` and `today + days_ahead`, both ends included.
///
/// Records whose date cannot be parsed are dropped. Input order is preserved.
pub fn filter_upcoming(records: Vec<IpoRecord>, days_ahead: u32, today: NaiveDate) -> Vec<IpoRecord> {
    let end = window_end(today, days_ahead);

    records
        .into_iter()
        .filter(|record| match parse_listing_date(&record.date) {
            Some(date) => today <= date && date <= end,
            None => {
                debug!(
                    "skipping [{}] {}, unparseable date {:?}",
                    record.symbol, record.company, record.date
                );
                false
            }
        })
        .collect()
}
