//! Query string parameters with repeated keys.
//!
//! The autocomplete wire protocol repeats the filter and exclude parameter
//! keys, so a plain map loses data. [`QueryParams`] keeps every value per
//! key in arrival order, decoding percent escapes and `+`-encoded spaces.

use std::collections::HashMap;

/// Parsed query string parameters.
///
/// # Examples
///
/// ```
/// use tomselect_rs_http::params::QueryParams;
///
/// let params = QueryParams::parse("q=art&f=a%3D1&f=b%3D2");
/// assert_eq!(params.get("q"), Some("art"));
/// assert_eq!(params.get_all("f"), vec!["a=1", "b=2"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    data: HashMap<String, Vec<String>>,
}

impl QueryParams {
    /// Parses a raw query string (without the leading `?`).
    ///
    /// Pairs without an `=` are treated as a key with an empty value; empty
    /// pairs are skipped.
    pub fn parse(query_string: &str) -> Self {
        let mut data: HashMap<String, Vec<String>> = HashMap::new();

        for pair in query_string.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair
                .find('=')
                .map_or((pair, ""), |eq| (&pair[..eq], &pair[eq + 1..]));
            data.entry(percent_decode(key))
                .or_default()
                .push(percent_decode(value));
        }

        Self { data }
    }

    /// Returns the first value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns every value for a key, in arrival order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.data
            .get(key)
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns `true` if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no parameters were parsed.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Decodes a percent-encoded query component, treating `+` as a space.
fn percent_decode(input: &str) -> String {
    let plus_decoded = input.replace('+', " ");
    percent_encoding::percent_decode_str(&plus_decoded)
        .decode_utf8_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let params = QueryParams::parse("q=art&p=2");
        assert_eq!(params.get("q"), Some("art"));
        assert_eq!(params.get("p"), Some("2"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_parse_empty_string() {
        let params = QueryParams::parse("");
        assert!(params.is_empty());
    }

    #[test]
    fn test_repeated_keys_keep_order() {
        let params = QueryParams::parse("f=a%3D1&f=b%3D2&f=c%3D3");
        assert_eq!(params.get_all("f"), vec!["a=1", "b=2", "c=3"]);
        // get() returns the first value.
        assert_eq!(params.get("f"), Some("a=1"));
    }

    #[test]
    fn test_key_without_value() {
        let params = QueryParams::parse("q");
        assert_eq!(params.get("q"), Some(""));
    }

    #[test]
    fn test_empty_value() {
        let params = QueryParams::parse("q=");
        assert_eq!(params.get("q"), Some(""));
    }

    #[test]
    fn test_percent_decoding() {
        let params = QueryParams::parse("q=hello%20world&f=title__icontains%3Dthe%20art");
        assert_eq!(params.get("q"), Some("hello world"));
        assert_eq!(params.get_all("f"), vec!["title__icontains=the art"]);
    }

    #[test]
    fn test_plus_as_space() {
        let params = QueryParams::parse("q=hello+world");
        assert_eq!(params.get("q"), Some("hello world"));
    }

    #[test]
    fn test_skips_empty_pairs() {
        let params = QueryParams::parse("a=1&&b=2&");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_missing_key() {
        let params = QueryParams::parse("a=1");
        assert_eq!(params.get("missing"), None);
        assert!(params.get_all("missing").is_empty());
        assert!(!params.contains_key("missing"));
    }
}
