use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Delimiter separating the viewer shell from the embedded stream address.
pub const URL_DELIMITER: &str = "?url=";

// Matches JavaScript's encodeURIComponent: everything but alphanumerics and
// - _ . ! ~ * ' ( ) is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Re-encode the stream address embedded in a viewer reference so it
/// survives one additional level of URL nesting. The suffix after the
/// delimiter contains `:`, `/`, `?` and `&` that the outer URL parser would
/// otherwise claim for itself. References without a delimiter (or with an
/// empty suffix) pass through unchanged.
pub fn compose(reference: &str) -> String {
    match reference.split_once(URL_DELIMITER) {
        Some((base, suffix)) if !suffix.is_empty() => {
            format!(
                "{}{}{}",
                base,
                URL_DELIMITER,
                utf8_percent_encode(suffix, COMPONENT)
            )
        }
        _ => reference.to_string(),
    }
}
