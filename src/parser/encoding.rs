use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use regex::bytes::Regex;

// Browsers only look for the charset declaration near the top of the document.
const SNIFF_LEN: usize = 1024;

static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i-u)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#).unwrap()
});

/// Charset named by a `<meta charset>` or `<meta http-equiv content="...; charset=">` tag.
pub fn declared_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    let label = META_CHARSET_RE.captures(head)?.get(1)?;
    Encoding::for_label(label.as_bytes())
}

/// Decode page bytes: UTF-8 when it is valid, else the declared charset,
/// else windows-1252 (a superset of Latin-1).
pub fn decode_html(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, malformed) = UTF_8.decode(bytes);
    if !malformed {
        return text;
    }

    let encoding = declared_charset(bytes).unwrap_or(WINDOWS_1252);
    tracing::debug!("Page is not valid UTF-8, decoding as {}", encoding.name());
    let (text, _, _) = encoding.decode(bytes);
    text
}
