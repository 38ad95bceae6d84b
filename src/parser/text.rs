use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every run of whitespace to a single space and trim the ends.
///
/// The result never contains a tab or newline, so it is safe to use as a
/// tab-separated field.
pub fn clean_text(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(clean_text("  a\n\tb   c "), "a b c");
    }

    #[test]
    fn carriage_return_and_form_feed() {
        assert_eq!(clean_text("10\r\n\x0ckg"), "10 kg");
    }

    #[test]
    fn unicode_whitespace() {
        // non-breaking space, as left behind by &nbsp;
        assert_eq!(clean_text("IP67\u{a0}\u{a0}rated"), "IP67 rated");
    }

    #[test]
    fn whitespace_only() {
        assert_eq!(clean_text(" \n\t "), "");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn untouched_when_clean() {
        assert_eq!(clean_text("Widget A"), "Widget A");
    }
}
