//! Byte decoding for stored content read from disk.

use std::borrow::Cow;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from `<meta charset="...">`)
/// 3. Falls back to Windows-1252 (common in legacy CMS exports)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
///
/// # Examples
///
/// ```
/// use quire::util::decode_text;
///
/// assert_eq!(decode_text("<p>Grüße</p>".as_bytes(), None), "<p>Grüße</p>");
/// assert_eq!(decode_text(b"<p>caf\xe9</p>", None), "<p>café</p>");
/// ```
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    // Try UTF-8 first (handles BOM automatically)
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        log::debug!(target: "quire::codec", "decoding input as {}", encoding.name());
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Decode stored HTML, honoring a `<meta charset>` declaration.
pub fn decode_html_bytes(bytes: &[u8]) -> Cow<'_, str> {
    decode_text(bytes, extract_meta_charset(bytes))
}

/// Extract the encoding named by a `<meta charset="...">` tag.
///
/// Only the first 1024 bytes are checked, as browsers do.
pub fn extract_meta_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(1024)];

    let pos = prefix
        .windows(8)
        .position(|w| w.eq_ignore_ascii_case(b"charset="))?;
    let after = &prefix[pos + 8..];

    let (start, end) = match after.first()? {
        quote @ (b'"' | b'\'') => {
            let len = after[1..].iter().position(|b| b == quote)?;
            (1, 1 + len)
        }
        _ => {
            let len = after
                .iter()
                .position(|b| matches!(b, b'"' | b'\'' | b';' | b'>' | b' ' | b'/'))
                .unwrap_or(after.len());
            (0, len)
        }
    };

    let name = std::str::from_utf8(&after[start..end]).ok()?;
    (!name.is_empty()).then_some(name)
}
