//! `application/x-www-form-urlencoded` request bodies

/// Ordered multimap of form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormBody {
    pairs: Vec<(String, String)>,
}

impl FormBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for `key`, keeping any existing values
    pub fn add(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.push((key.to_string(), value.into()));
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[cfg(test)]
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode as `key=value&...`, sorted by key. Values sharing a key keep
    /// their insertion order.
    pub fn encode(&self) -> String {
        let mut sorted: Vec<&(String, String)> = self.pairs.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));

        sorted
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Parse an encoded body back into fields. Undecodable pairs are skipped.
    #[cfg(test)]
    pub fn decode(encoded: &str) -> Self {
        let pairs = encoded
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                let k = urlencoding::decode(&k.replace('+', " ")).ok()?.into_owned();
                let v = urlencoding::decode(&v.replace('+', " ")).ok()?.into_owned();
                Some((k, v))
            })
            .collect();

        Self { pairs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_sorts_keys_and_escapes_values() {
        let mut form = FormBody::new();
        form.add("url", "https://example.com/a b");
        form.add("friendly_name", "My & Site");
        form.add("interval", "300");

        assert_eq!(
            form.encode(),
            "friendly_name=My%20%26%20Site&interval=300&url=https%3A%2F%2Fexample.com%2Fa%20b"
        );
    }

    #[test]
    fn test_repeated_keys_keep_insertion_order() {
        let mut form = FormBody::new();
        form.add("b", "2");
        form.add("a", "first");
        form.add("a", "second");

        assert_eq!(form.encode(), "a=first&a=second&b=2");
        assert_eq!(form.get("a"), Some("first"));
    }

    #[test]
    fn test_decode_reverses_encode() {
        let mut form = FormBody::new();
        form.add("custom_http_headers", r#"{"X-Token":"a=b&c"}"#);
        form.add("alert_contacts", "5_2_1-7_0_0");

        let decoded = FormBody::decode(&form.encode());
        assert_eq!(decoded.get("custom_http_headers"), Some(r#"{"X-Token":"a=b&c"}"#));
        assert_eq!(decoded.get("alert_contacts"), Some("5_2_1-7_0_0"));
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn test_empty_value_is_kept() {
        let mut form = FormBody::new();
        form.add("alert_contacts", "");

        assert_eq!(form.encode(), "alert_contacts=");
        assert!(FormBody::decode("alert_contacts=").contains_key("alert_contacts"));
        assert!(FormBody::decode("").is_empty());
    }
}
