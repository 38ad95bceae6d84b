use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::text::clean_text;

static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
static ROW_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td, th").unwrap());

/// One table row: normalized cell strings in document order.
pub type Row = Vec<String>;

/// Flatten every table in the document into one sequence of rows.
///
/// Tables are visited in document order and their rows are concatenated with
/// no boundary marker. Rows and cells are matched as descendants, so the rows
/// of a nested table show up under the outer table and again for the inner
/// one. Rows without any cell are dropped; empty cells are kept as `""`.
pub fn extract_tables(doc: &Html) -> Vec<Row> {
    let tables: Vec<ElementRef> = doc.select(&TABLE_SELECTOR).collect();
    if tables.is_empty() {
        tracing::info!("No tables found on the page");
        return Vec::new();
    }

    tracing::info!("{} table(s) found on the page", tables.len());
    tables
        .into_iter()
        .flat_map(|table| table.select(&ROW_SELECTOR))
        .map(extract_row)
        .filter(|cells| !cells.is_empty())
        .collect()
}

fn extract_row(row: ElementRef) -> Row {
    row.select(&CELL_SELECTOR)
        .map(|cell| clean_text(&cell.text().collect::<String>()))
        .collect()
}
