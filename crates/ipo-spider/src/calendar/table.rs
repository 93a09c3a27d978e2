use super::RowExtractor;
use crate::error::{Result, SpiderError};
use scraper::{Html, Selector};
use tracing::trace;

/// Reads every `<tr>` under every `<tbody>` on the page.
///
/// The calendar splits listings over several tables ("This Week", "Next Week", ...), all
/// sharing one column layout, so rows from every table body are gathered in page order.
#[derive(Debug)]
pub struct TableBodyExtractor {
    tbody: Selector,
    tr: Selector,
    td: Selector,
}

impl TableBodyExtractor {
    pub fn new() -> Self {
        Self {
            tbody: Selector::parse("tbody").expect("valid tbody selector"),
            tr: Selector::parse("tr").expect("valid tr selector"),
            td: Selector::parse("td").expect("valid td selector"),
        }
    }
}

impl Default for TableBodyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RowExtractor for TableBodyExtractor {
    fn extract_rows(&self, html: &str) -> Result<Vec<Vec<String>>> {
        let document = Html::parse_document(html);

        let bodies: Vec<_> = document.select(&self.tbody).collect();
        if bodies.is_empty() {
            return Err(SpiderError::Structure(
                "unable to locate an IPO table body on the calendar page".to_string(),
            ));
        }
        trace!("found {} table bodies", bodies.len());

        let rows = bodies
            .into_iter()
            .flat_map(|tbody| tbody.select(&self.tr))
            .map(|tr| {
                tr.select(&self.td)
                    // whitespace between nested inline elements is kept; only the ends are trimmed
                    .map(|td| td.text().collect::<String>().trim().to_string())
                    .collect()
            })
            .collect();

        Ok(rows)
    }
}
