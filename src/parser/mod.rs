pub mod encoding;
pub mod image;
pub mod tables;
pub mod text;

use scraper::{Html, Selector};

pub use tables::Row;

/// Everything the pipeline needs from one product page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageData {
    pub rows: Vec<Row>,
    pub image_url: Option<String>,
}

/// Parse fetched bytes into a document tree, honouring a declared `<meta charset>`
/// when the bytes are not valid UTF-8.
pub fn parse_document(bytes: &[u8]) -> Html {
    Html::parse_document(&encoding::decode_html(bytes))
}

/// Two-pass extraction over one document: tables, then the product image.
pub fn extract_page(doc: &Html, image_selector: &Selector) -> PageData {
    PageData {
        rows: tables::extract_tables(doc),
        image_url: image::locate_image(doc, image_selector),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_latin1_page() {
        let bytes = b"<html><head><meta charset=\"iso-8859-1\"></head><body>\
                      <table><tr><td>Ambient temperature</td><td>-25 \xb0C ... +55 \xb0C</td></tr></table>\
                      </body></html>";
        let rows = tables::extract_tables(&parse_document(bytes));
        assert_eq!(rows, vec![vec!["Ambient temperature", "-25 °C ... +55 °C"]]);
    }

    #[test]
    fn invalid_utf8_without_declaration() {
        let mut bytes = b"<table><tr><td>caf".to_vec();
        bytes.push(0xe9);
        bytes.extend_from_slice(b"</td></tr></table>");
        let rows = tables::extract_tables(&parse_document(&bytes));
        assert_eq!(rows, vec![vec!["café"]]);
        assert!(!rows[0][0].contains('\u{fffd}'));
    }

    #[test]
    fn product_fixture() {
        let bytes = std::fs::read("tests/fixtures/product.html").unwrap();
        let selector = image::parse_selector(image::DEFAULT_IMAGE_SELECTOR).unwrap();
        let page = extract_page(&parse_document(&bytes), &selector);
        assert_eq!(page.rows.len(), 7);
        assert_eq!(page.rows[0], vec!["Feature", "Value"]);
        assert!(page.image_url.is_some());
    }

    #[test]
    fn empty_page() {
        let selector = image::parse_selector(image::DEFAULT_IMAGE_SELECTOR).unwrap();
        let page = extract_page(&parse_document(b""), &selector);
        assert_eq!(page, PageData::default());
    }
}
