//! Byte classification for tag names and attribute keys.

/// Check if a byte may appear in a tag name or attribute key.
///
/// Names are restricted to ASCII lowercase letters, digits, `_` and `-`.
#[inline]
pub fn is_name_byte(b: u8) -> bool {
    matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-')
}

/// Check if a byte is whitespace that may follow the root element.
#[inline]
pub(crate) fn is_trailing_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
