use std::path::Path;

use url::Url;

use crate::error::{Result, ScrapeError};

pub const DATASHEET_FILE_NAME: &str = "product_datasheet.pdf";
const DEFAULT_IMAGE_EXT: &str = ".jpg";

/// Resolve an `src`/`href` against the page it was found on.
/// Absolute URLs pass through; relative and protocol-relative ones are joined.
pub fn resolve_url(base: &Url, href: &str) -> Result<Url> {
    base.join(href).map_err(|source| ScrapeError::InvalidUrl {
        url: href.to_string(),
        source,
    })
}

pub fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|source| ScrapeError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

/// Extension of the last path segment, dot included. Query and fragment are ignored.
pub fn image_extension(url: &Url) -> String {
    let last = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");

    Path::new(last)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_else(|| DEFAULT_IMAGE_EXT.to_string())
}

pub fn image_file_name(url: &Url) -> String {
    format!("product_image{}", image_extension(url))
}
