//! Percent-encoding and inline image patterns
//!
//! Byte strings that end up in JSON (the identifier, metadata keys and
//! values, inline images) are percent-encoded so the document stays plain
//! printable ASCII. Images that are one short byte sequence repeated are
//! written inline as `%XX..`; all other images go to sidecar files.

use ktx_juggle_core::{ImageStore, KtxError, Result};
use std::fmt::Write as _;

const RESERVED: &[u8] = b"%\"\\";

fn is_literal(byte: u8) -> bool {
    (0x20..=0x7E).contains(&byte) && !RESERVED.contains(&byte)
}

/// Percent-encode `bytes`
///
/// With `allow_printable`, printable ASCII other than `%`, `"` and `\` is
/// kept as is. Every other byte becomes an uppercase `%XX` escape.
pub fn percent_encode(bytes: &[u8], allow_printable: bool) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 3);
    for &byte in bytes {
        if allow_printable && is_literal(byte) {
            encoded.push(byte as char);
        } else {
            // Writing to a String cannot fail
            let _ = write!(encoded, "%{:02X}", byte);
        }
    }
    encoded
}

/// Decode a string produced by [`percent_encode`]
///
/// Rejects truncated or non-hex escapes and any character that would not
/// have been written literally.
pub fn percent_decode(input: &str) -> Result<Vec<u8>> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if byte == b'%' {
            let digits = bytes
                .get(i + 1..i + 3)
                .filter(|digits| digits.iter().all(u8::is_ascii_hexdigit))
                .ok_or_else(|| KtxError::percent_decode(input))?;
            decoded.push((hex_value(digits[0]) << 4) | hex_value(digits[1]));
            i += 3;
        } else if is_literal(byte) {
            decoded.push(byte);
            i += 1;
        } else {
            return Err(KtxError::percent_decode(input));
        }
    }

    Ok(decoded)
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

/// Shortest prefix of at most `max_len` bytes that tiles `bytes` exactly
pub fn find_repeating_pattern(bytes: &[u8], max_len: usize) -> Option<&[u8]> {
    if bytes.is_empty() {
        return None;
    }
    (1..=max_len.min(bytes.len()))
        .filter(|len| bytes.len() % len == 0)
        .find(|&len| bytes.chunks(len).all(|chunk| chunk == &bytes[..len]))
        .map(|len| &bytes[..len])
}

/// Resolve an image reference from a JSON document
///
/// A name starting with `%` is an inline pattern, tiled to `size` bytes.
/// Anything else names a sidecar file in `store`.
pub fn name_to_bytes(size: usize, name: &str, store: &dyn ImageStore) -> Result<Vec<u8>> {
    if !name.starts_with('%') {
        return store.read(name);
    }

    let pattern = percent_decode(name)?;
    if pattern.is_empty() || size % pattern.len() != 0 {
        return Err(KtxError::pattern_size(pattern.len(), size));
    }
    Ok(pattern.repeat(size / pattern.len()))
}

/// Produce the image reference written to a JSON document
///
/// Images of exactly `size` bytes made of a pattern no longer than
/// `max_inline` are returned inline. Otherwise the image is stored under
/// `name` and `name` is returned, so an image whose length disagrees with
/// `size` keeps its length when loaded again.
pub fn bytes_to_name(
    size: usize,
    bytes: &[u8],
    name: &str,
    store: &mut dyn ImageStore,
    max_inline: usize,
) -> Result<String> {
    if bytes.len() == size {
        if let Some(pattern) = find_repeating_pattern(bytes, max_inline) {
            return Ok(percent_encode(pattern, false));
        }
    }

    tracing::debug!("Writing {} bytes to {}", bytes.len(), name);
    store.write(name, bytes)?;
    Ok(name.to_string())
}
