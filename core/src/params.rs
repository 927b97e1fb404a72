use std::collections::BTreeMap;

pub type Params = BTreeMap<String, String>;

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

// malformed escapes stay literal
fn decode_bytes(input: &str, plus_as_space: bool) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => match (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            other => {
                out.push(other);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

// + stays + in path segments, unlike in queries
pub fn decode_uri_component(input: &str) -> String {
    decode_bytes(input, false)
}

pub fn parse_query(query: &str) -> Params {
    let mut params = Params::new();

    for pair in query.trim_start_matches('?').split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = match pair.split_once('=') {
            Some((key, value)) => (key, value),
            None => (pair, ""),
        };
        // duplicate keys keep the last occurrence
        params.insert(decode_bytes(key, true), decode_bytes(value, true));
    }

    params
}

// the form-encoding safe set
fn form_safe(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'*' | b'-' | b'.' | b'_')
}

// the uri-component safe set, a superset of the form one
fn component_safe(b: u8) -> bool {
    form_safe(b) || matches!(b, b'!' | b'~' | b'\'' | b'(' | b')')
}

fn push_escaped(out: &mut String, b: u8) {
    out.push('%');
    let hex = b"0123456789ABCDEF";
    out.push(hex[(b >> 4) as usize] as char);
    out.push(hex[(b & 0x0F) as usize] as char);
}

// space escapes to %20 here, never +
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        if component_safe(b) {
            out.push(b as char);
        } else {
            push_escaped(&mut out, b);
        }
    }
    out
}

fn push_form_encoded(query: &mut String, part: &str) {
    for &b in part.as_bytes() {
        if form_safe(b) {
            query.push(b as char);
        } else if b == b' ' {
            query.push('+');
        } else {
            push_escaped(query, b);
        }
    }
}

pub fn append_pair(query: &mut String, key: &str, value: &str) {
    if !query.is_empty() {
        query.push('&');
    }
    push_form_encoded(query, key);
    query.push('=');
    push_form_encoded(query, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(query: &str) -> Vec<(String, String)> {
        parse_query(query).into_iter().collect()
    }

    #[test]
    pub fn test_parse_basic() {
        assert_eq!(
            parsed("mode=latest&search=solar"),
            vec![
                ("mode".to_owned(), "latest".to_owned()),
                ("search".to_owned(), "solar".to_owned()),
            ]
        );
    }

    #[test]
    pub fn test_parse_edge_shapes() {
        // bare key, empty pairs, leading question mark
        assert_eq!(parsed("?flag"), vec![("flag".to_owned(), String::new())]);
        assert_eq!(
            parsed("a=1&&b=2"),
            vec![
                ("a".to_owned(), "1".to_owned()),
                ("b".to_owned(), "2".to_owned()),
            ]
        );
        assert_eq!(parsed(""), vec![]);
    }

    #[test]
    pub fn test_parse_last_duplicate_wins() {
        assert_eq!(
            parsed("mode=latest&mode=trending"),
            vec![("mode".to_owned(), "trending".to_owned())]
        );
    }

    #[test]
    pub fn test_parse_decodes_plus_and_percent() {
        assert_eq!(
            parsed("search=solar+panels%20%26+wind"),
            vec![("search".to_owned(), "solar panels & wind".to_owned())]
        );
    }

    #[test]
    pub fn test_malformed_escapes_stay_literal() {
        assert_eq!(
            parsed("search=100%&q=%G1&r=%2"),
            vec![
                ("q".to_owned(), "%G1".to_owned()),
                ("r".to_owned(), "%2".to_owned()),
                ("search".to_owned(), "100%".to_owned()),
            ]
        );
        // invalid utf-8 decodes lossily instead of failing
        assert_eq!(decode_uri_component("%FF"), "\u{FFFD}");
    }

    #[test]
    pub fn test_append_pair_form_encoding() {
        let mut query = String::new();
        append_pair(&mut query, "mode", "latest");
        append_pair(&mut query, "search", "solar & wind=100%");
        assert_eq!(query, "mode=latest&search=solar+%26+wind%3D100%25");
    }

    #[test]
    pub fn test_query_round_trip() {
        let search = "Ren & Stimpy=100% +więcej*_.-";
        let mut query = String::new();
        append_pair(&mut query, "mode", "trending");
        append_pair(&mut query, "search", search);

        let params = parse_query(&query);
        assert_eq!(params.get("mode").map(String::as_str), Some("trending"));
        assert_eq!(params.get("search").map(String::as_str), Some(search));
    }

    #[test]
    pub fn test_uri_component_round_trip() {
        let id = "säll post/id?with specials+&=";
        let encoded = encode_uri_component(id);
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('?'));
        assert_eq!(decode_uri_component(&encoded), id);

        // space goes to %20 in segments, never +
        assert_eq!(encode_uri_component("a b"), "a%20b");
        assert_eq!(decode_uri_component("a+b"), "a+b");
    }

    #[test]
    pub fn test_uri_component_safe_set() {
        assert_eq!(encode_uri_component("azAZ09*-._!~'()"), "azAZ09*-._!~'()");
        assert_eq!(encode_uri_component("ä"), "%C3%A4");
    }
}
