use std::collections::HashMap;

use crate::forms::RequestData;

/// Parse URL-encoded form body into a HashMap
pub fn parse_urlencoded_body(body: &[u8]) -> HashMap<String, Vec<String>> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    let raw = String::from_utf8_lossy(body);
    for pair in raw.split('&') {
        if pair.is_empty() {
            continue;
        }
        let mut parts = pair.splitn(2, '=');
        let key = decode_component(parts.next().unwrap_or(""));
        let val = decode_component(parts.next().unwrap_or(""));
        map.entry(key).or_default().push(val);
    }
    map
}

/// Submitted form fields; a repeated key keeps its last value.
pub fn form_request_data(body: &[u8]) -> RequestData {
    parse_urlencoded_body(body)
        .into_iter()
        .filter_map(|(key, mut values)| values.pop().map(|v| (key, v)))
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plus_and_percent_escapes() {
        let map = parse_urlencoded_body(b"name=John+Doe&city=Brno%20%26%20Praha");
        assert_eq!(map["name"], vec!["John Doe"]);
        assert_eq!(map["city"], vec!["Brno & Praha"]);
    }

    #[test]
    fn collects_repeated_keys() {
        let map = parse_urlencoded_body(b"a=1&&a=2&b=");
        assert_eq!(map["a"], vec!["1", "2"]);
        assert_eq!(map["b"], vec![""]);
    }

    #[test]
    fn request_data_keeps_last_value() {
        let data = form_request_data(b"proto=dhcp&proto=static&csrf_token=abc");
        assert_eq!(data.get("proto").map(String::as_str), Some("static"));
        assert_eq!(data.get("csrf_token").map(String::as_str), Some("abc"));
    }
}
