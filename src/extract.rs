use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;

static TABLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table#signatures").unwrap());
static ROW_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static CELL_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static PAGINATION_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ul.pagination").unwrap());
static PAGE_LINK_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a.page-link").unwrap());

/// Text the site puts in the name cell when a signer chose to stay anonymous.
const ANONYMOUS_MARKER: &str = "Podpisaný rozhodol";
const NEXT_PAGE_TEXT: &str = " »";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureRecord {
    pub name: String,
    pub city: String,
    pub comment: String,
    pub date: String,
}

impl SignatureRecord {
    /// All-blank record standing in for an anonymized signer.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty() && self.city.is_empty() && self.comment.is_empty() && self.date.is_empty()
    }

    pub fn as_row(&self) -> [&str; 4] {
        [&self.name, &self.city, &self.comment, &self.date]
    }
}

/// Pull every signature row out of the `signatures` table, header row excluded.
pub fn extract_rows(doc: &Html) -> Result<Vec<SignatureRecord>, ScrapeError> {
    let table = doc.select(&TABLE_SEL).next().ok_or(ScrapeError::MissingTable)?;

    let mut records = Vec::new();
    for (row, tr) in table.select(&ROW_SEL).enumerate().skip(1) {
        let cells: Vec<ElementRef> = tr.select(&CELL_SEL).collect();
        let cell = |index: usize| -> Result<String, ScrapeError> {
            cells
                .get(index)
                .map(cell_text)
                .ok_or(ScrapeError::MissingCell { row, index })
        };

        let name = cell(1)?;
        if name.contains(ANONYMOUS_MARKER) {
            records.push(SignatureRecord::anonymous());
            continue;
        }

        records.push(SignatureRecord {
            name: name.trim().to_string(),
            city: cell(2)?.trim().to_string(),
            comment: cell(3)?.trim().to_string(),
            date: cell(4)?.trim().to_string(),
        });
    }

    Ok(records)
}

/// True when the pagination bar carries a "next" link.
pub fn has_next_page(doc: &Html) -> bool {
    match doc.select(&PAGINATION_SEL).next() {
        Some(pagination) => pagination
            .select(&PAGE_LINK_SEL)
            .any(|a| cell_text(&a) == NEXT_PAGE_TEXT),
        None => false,
    }
}

fn cell_text(el: &ElementRef) -> String {
    el.text().collect()
}
