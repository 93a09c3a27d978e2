use crate::calendar::IpoRecord;
use crate::config::Config;
use crate::error::{Result, SpiderError};
use chrono::DateTime;
use chrono_tz::Tz;
use tera::{Context, Tera};
use tracing::debug;

/// Format of the as-of date in the subject and bodies, e.g. "August 04, 2025".
pub const AS_OF_FORMAT: &str = "%B %d, %Y";

const PLAIN_TEMPLATE: &str = "report.txt";
const HTML_TEMPLATE: &str = "report.html";

// revenue is collected by the scraper but deliberately left out of both layouts
const PLAIN_BODY: &str = "\
IPO Date | Symbol | Company | Exchange | Price Range | Shares Offered | Deal Size | Market Cap
{{ rule }}
{%- for ipo in ipos %}
{{ ipo.date }} | {{ ipo.symbol }} | {{ ipo.company }} | {{ ipo.exchange }} | {{ ipo.price_range }} | {{ ipo.shares_offered }} | {{ ipo.deal_size }} | {{ ipo.market_cap }}
{%- endfor %}";

const HTML_BODY: &str = "\
<html><body>\
<p>Upcoming IPOs scheduled within the next week as of {{ as_of }}:</p>\
<table border='1' cellpadding='5' cellspacing='0'>\
<thead><tr>\
<th>IPO Date</th><th>Symbol</th><th>Company</th><th>Exchange</th>\
<th>Price Range</th><th>Shares Offered</th><th>Deal Size</th><th>Market Cap</th>\
</tr></thead>\
<tbody>\
{% for ipo in ipos %}<tr>\
<td>{{ ipo.date }}</td><td>{{ ipo.symbol }}</td><td>{{ ipo.company }}</td><td>{{ ipo.exchange }}</td>\
<td>{{ ipo.price_range }}</td><td>{{ ipo.shares_offered }}</td><td>{{ ipo.deal_size }}</td><td>{{ ipo.market_cap }}</td>\
</tr>{% endfor %}\
</tbody>\
</table>\
<p style='margin-top:1em;'>This information is sourced from StockAnalysis' IPO calendar. \
Please note that IPO dates and valuations may change as companies update their filings.</p>\
</body></html>";

/// A composed email, ready to hand to a [`Dispatcher`](crate::mail::Dispatcher).
#[derive(Clone, Debug)]
pub struct Report {
    pub subject: String,
    pub sender: String,
    pub recipient: String,
    pub generated_at: DateTime<Tz>,
    pub records: Vec<IpoRecord>,
    pub plain: String,
    pub html: String,
}

impl Report {
    pub fn as_of(&self) -> String {
        as_of(&self.generated_at)
    }
}

pub fn as_of(now: &DateTime<Tz>) -> String {
    now.format(AS_OF_FORMAT).to_string()
}

pub fn subject(as_of: &str) -> String {
    format!("Upcoming IPOs – Week of {as_of}")
}

/// Renders filtered records into the plain-text and HTML bodies of the weekly email.
#[derive(Debug)]
pub struct Composer {
    tera: Tera,
}

impl Composer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![(PLAIN_TEMPLATE, PLAIN_BODY), (HTML_TEMPLATE, HTML_BODY)])
            .map_err(|source| SpiderError::Render {
                template: "report templates",
                source,
            })?;

        Ok(Self { tera })
    }

    /// Compose the report for `records` as of `now`, addressed as configured.
    pub fn compose(&self, records: Vec<IpoRecord>, config: &Config, now: DateTime<Tz>) -> Result<Report> {
        let as_of = as_of(&now);

        let (plain, html) = if records.is_empty() {
            let sentence =
                format!("There are no IPOs scheduled within the upcoming week as of {as_of}.");
            let html = format!("<p>{sentence}</p>");
            (sentence, html)
        } else {
            let mut context = Context::new();
            context.insert("as_of", &as_of);
            context.insert("rule", &"-".repeat(80));
            context.insert("ipos", &records);
            (
                self.render(PLAIN_TEMPLATE, &context)?,
                self.render(HTML_TEMPLATE, &context)?,
            )
        };
        debug!("composed report of {} IPOs as of {as_of}", records.len());

        Ok(Report {
            subject: subject(&as_of),
            sender: config.sender.clone(),
            recipient: config.recipient.clone(),
            generated_at: now,
            records,
            plain,
            html,
        })
    }

    fn render(&self, template: &'static str, context: &Context) -> Result<String> {
        self.tera
            .render(template, context)
            .map_err(|source| SpiderError::Render { template, source })
    }
}
