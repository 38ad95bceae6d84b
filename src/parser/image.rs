use scraper::{Html, Selector};

use crate::error::{Result, ScrapeError};

/// Matches the product image on the catalog page this tool was written for.
/// The class list looks generated, so it is overridable from the config.
pub const DEFAULT_IMAGE_SELECTOR: &str = "img.block.margin-auto.loaded";

pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Return the `src` of the first element matching `selector`.
///
/// Only the first match is considered: if it has no usable `src`, the page is
/// treated as having no product image.
pub fn locate_image(doc: &Html, selector: &Selector) -> Option<String> {
    let Some(tag) = doc.select(selector).next() else {
        tracing::info!("No image tag found matching the image selector");
        return None;
    };

    match tag.value().attr("src").map(str::trim) {
        Some(src) if !src.is_empty() => {
            tracing::info!("Product image URL found: {}", src);
            Some(src.to_string())
        }
        _ => {
            tracing::info!("Image tag has no src attribute");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_selector() -> Selector {
        parse_selector(DEFAULT_IMAGE_SELECTOR).unwrap()
    }

    #[test]
    fn finds_product_image() {
        let doc = Html::parse_document(
            r#"<img class="thumb" src="/t.png"><img class="block margin-auto loaded" src="/p.png">"#,
        );
        assert_eq!(locate_image(&doc, &default_selector()).as_deref(), Some("/p.png"));
    }

    #[test]
    fn class_order_does_not_matter() {
        let doc = Html::parse_document(r#"<img class="loaded block margin-auto" src="a.jpg">"#);
        assert_eq!(locate_image(&doc, &default_selector()).as_deref(), Some("a.jpg"));
    }

    #[test]
    fn missing_class_is_none() {
        let doc = Html::parse_document(r#"<img class="block margin-auto" src="a.jpg">"#);
        assert_eq!(locate_image(&doc, &default_selector()), None);
    }

    #[test]
    fn first_match_without_src_is_none() {
        let doc = Html::parse_document(
            r#"<img class="block margin-auto loaded" src=""><img class="block margin-auto loaded" src="b.jpg">"#,
        );
        assert_eq!(locate_image(&doc, &default_selector()), None);
    }

    #[test]
    fn custom_selector() {
        let doc = Html::parse_document(r#"<div id="hero"><img src="hero.webp"></div>"#);
        let selector = parse_selector("#hero img").unwrap();
        assert_eq!(locate_image(&doc, &selector).as_deref(), Some("hero.webp"));
    }

    #[test]
    fn invalid_selector() {
        assert!(matches!(
            parse_selector("img[["),
            Err(ScrapeError::Selector { .. })
        ));
    }

    #[test]
    fn product_fixture() {
        let html = std::fs::read_to_string("tests/fixtures/product.html").unwrap();
        let doc = Html::parse_document(&html);
        assert_eq!(
            locate_image(&doc, &default_selector()).as_deref(),
            Some("/media/product/p661408.png?width=800")
        );
    }
}
