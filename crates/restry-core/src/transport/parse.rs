//! Parse libcurl header lines and response bodies.

use serde_json::Value;

use crate::response::Headers;

/// Parse collected header lines into a header map with lower-cased names.
///
/// When redirects are followed libcurl reports one header block per hop;
/// each status line starts a fresh block so only the final response's
/// headers are kept.
pub fn parse_headers(lines: &[String]) -> Headers {
    let mut headers = Headers::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            headers.clear();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }
    headers
}

/// Decode a response body: empty -> `null`, JSON -> parsed value, anything
/// else -> a JSON string of the (lossy UTF-8) text.
pub fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    match serde_json::from_slice(bytes) {
        Ok(v) => v,
        Err(_) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_headers_lowercases_names() {
        let h = parse_headers(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Type: application/json",
            "X-Request-Id:  abc ",
        ]));
        assert_eq!(h.get("content-type").map(String::as_str), Some("application/json"));
        assert_eq!(h.get("x-request-id").map(String::as_str), Some("abc"));
    }

    #[test]
    fn parse_headers_keeps_only_final_block() {
        let h = parse_headers(&lines(&[
            "HTTP/1.1 302 Found",
            "Location: /next",
            "",
            "HTTP/1.1 200 OK",
            "Content-Length: 2",
        ]));
        assert!(h.get("location").is_none());
        assert_eq!(h.get("content-length").map(String::as_str), Some("2"));
    }

    #[test]
    fn decode_body_variants() {
        assert_eq!(decode_body(b""), Value::Null);
        assert_eq!(decode_body(b"  \r\n"), Value::Null);
        assert_eq!(decode_body(br#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(decode_body(b"plain text"), json!("plain text"));
    }
}
