//! Custom content headers.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Ordered collection of content headers.
///
/// Lookups are case-insensitive; the name casing of the most recent `set`
/// is what goes out on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    headers: Vec<(String, String)>,
}

impl Headers {
    /// Creates a new empty header collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header value, replacing any existing value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some(slot) => *slot = (name, value),
            None => self.headers.push((name, value)),
        }
    }

    /// Gets the value for a header.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Removes a header.
    pub fn remove(&mut self, name: &str) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    /// Returns true if no headers are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns an iterator over all headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl Serialize for Headers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (name, value) in &self.headers {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_new() {
        let headers = Headers::new();
        assert!(headers.is_empty());
    }

    #[test]
    fn test_headers_set_get() {
        let mut headers = Headers::new();
        headers.set("X-Campaign", "spring");
        assert_eq!(headers.get("X-Campaign"), Some("spring"));
        assert_eq!(headers.get("x-campaign"), Some("spring"));
    }

    #[test]
    fn test_headers_set_replaces() {
        let mut headers = Headers::new();
        headers.set("Cc", "a@example.com");
        headers.set("CC", "b@example.com");
        assert_eq!(headers.iter().count(), 1);
        assert_eq!(headers.get("cc"), Some("b@example.com"));
        assert_eq!(headers.iter().next(), Some(("CC", "b@example.com")));
    }

    #[test]
    fn test_headers_remove() {
        let mut headers = Headers::new();
        headers.set("Subject", "Test");
        headers.remove("subject");
        assert!(headers.get("Subject").is_none());
    }

    #[test]
    fn test_headers_serialize_in_order() {
        let mut headers = Headers::new();
        headers.set("X-B", "2");
        headers.set("X-A", "1");
        let json = serde_json::to_string(&headers).unwrap();
        assert_eq!(json, r#"{"X-B":"2","X-A":"1"}"#);
    }
}
