//! Request-target helpers
//!
//! Percent decoding/encoding and HTML escaping for paths.

/// Split a request target into its path and the rest (`?query` / `#fragment`)
pub fn split_target(target: &str) -> (&str, &str) {
    match target.find(['?', '#']) {
        Some(idx) => target.split_at(idx),
        None => (target, ""),
    }
}

/// Collapse a run of leading slashes into one, so `//host/x` can never
/// become a protocol-relative redirect
pub fn collapse_leading_slashes(target: &str) -> &str {
    if target.starts_with("//") {
        let trimmed = target.trim_start_matches('/');
        &target[target.len() - trimmed.len() - 1..]
    } else {
        target
    }
}

/// Decode `%XX` escapes. Malformed escapes are kept literally, `+` is not
/// treated as a space, invalid UTF-8 is replaced.
pub fn decode_percent(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Percent-encode a path for use in an `href`. Unreserved characters and `/`
/// pass through.
pub fn encode_href(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for b in input.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~' | b'/') {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

/// Escape text for an HTML element body
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
