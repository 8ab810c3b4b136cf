//! Query-string and form encoding.

use core::fmt::Write;

/// Percent-encodes one query component. Unreserved characters pass
/// through, spaces become `+`, everything else is `%XX`-escaped byte by
/// byte.
pub(crate) fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(char::from(byte));
            }
            b' ' => out.push('+'),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

/// Serializes key/value pairs as an `application/x-www-form-urlencoded`
/// string.
pub(crate) fn form_encode(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(name, value)| format!("{}={}", encode_component(name), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Appends a query string to a URL, joining with `&` when the URL already
/// carries a query.
pub(crate) fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_owned();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreserved_characters_pass_through() {
        assert_eq!(encode_component("abc-XYZ_0.9~"), "abc-XYZ_0.9~");
    }

    #[test]
    fn spaces_become_plus() {
        assert_eq!(encode_component("a b c"), "a+b+c");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(encode_component("a=b&c"), "a%3Db%26c");
        assert_eq!(encode_component("100%"), "100%25");
    }

    #[test]
    fn multibyte_input_escapes_every_byte() {
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn pairs_join_with_ampersands() {
        let pairs = vec![
            ("a".to_owned(), "1".to_owned()),
            ("b c".to_owned(), "2&3".to_owned()),
        ];
        assert_eq!(form_encode(&pairs), "a=1&b+c=2%263");
    }

    #[test]
    fn append_query_picks_the_separator() {
        assert_eq!(append_query("/api", "a=1"), "/api?a=1");
        assert_eq!(append_query("/api?x=0", "a=1"), "/api?x=0&a=1");
        assert_eq!(append_query("/api", ""), "/api");
    }
}
