//! Percent-encoding for query strings

/// RFC 3986 percent-encode a query parameter name or value
///
/// Only ASCII letters, digits and `-_.~` pass through; every other byte of
/// the UTF-8 form is escaped. Empty or whitespace-only input encodes to "".
pub fn encode_param(value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    urlencoding::encode(value).into_owned()
}
