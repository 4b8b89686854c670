//! Per-route construction of outbound upstream queries.

use crate::query::params::RawParams;

const EVERYTHING_PATH: &str = "everything";
const TOP_HEADLINES_PATH: &str = "top-headlines";

const DEFAULT_SEARCH: &str = "world";
const DEFAULT_CATEGORY: &str = "general";
const HEADLINES_LANGUAGE: &str = "en";

/// A canonical request against the upstream API.
///
/// Keys are fixed per route and never empty. Values are kept decoded and
/// are percent-encoded only when joined into the target URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundQuery {
    /// Path relative to the upstream base URL.
    pub endpoint_path: &'static str,

    /// Query parameters in the order they are sent.
    pub parameters: Vec<(&'static str, String)>,
}

impl OutboundQuery {
    /// Look up a parameter value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Query for the `everything` search endpoint.
pub fn build_everything_query(raw: &RawParams) -> OutboundQuery {
    OutboundQuery {
        endpoint_path: EVERYTHING_PATH,
        parameters: vec![
            ("q", non_empty_or(raw.q.as_deref(), DEFAULT_SEARCH)),
            ("page", raw.page().to_string()),
            ("pageSize", raw.page_size().to_string()),
        ],
    }
}

/// Query for English top headlines in a category.
pub fn build_top_headlines_query(raw: &RawParams) -> OutboundQuery {
    OutboundQuery {
        endpoint_path: TOP_HEADLINES_PATH,
        parameters: vec![
            ("category", non_empty_or(raw.category.as_deref(), DEFAULT_CATEGORY)),
            ("language", HEADLINES_LANGUAGE.to_string()),
            ("page", raw.page().to_string()),
            ("pageSize", raw.page_size().to_string()),
        ],
    }
}

/// Query for top headlines in one country.
///
/// The country code is forwarded as given; the upstream decides whether it
/// is valid.
pub fn build_country_query(country_code: &str, raw: &RawParams) -> OutboundQuery {
    OutboundQuery {
        endpoint_path: TOP_HEADLINES_PATH,
        parameters: vec![
            ("country", country_code.to_string()),
            ("page", raw.page().to_string()),
            ("pageSize", raw.page_size().to_string()),
        ],
    }
}

fn non_empty_or(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(query: &str) -> RawParams {
        RawParams::from_query(Some(query))
    }

    #[test]
    fn test_everything_defaults() {
        let query = build_everything_query(&RawParams::default());
        assert_eq!(query.endpoint_path, "everything");
        assert_eq!(
            query.parameters,
            vec![
                ("q", "world".to_string()),
                ("page", "1".to_string()),
                ("pageSize", "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_everything_empty_search_uses_default() {
        let query = build_everything_query(&raw("q=&page=abc"));
        assert_eq!(query.get("q"), Some("world"));
        assert_eq!(query.get("page"), Some("1"));
    }

    #[test]
    fn test_everything_passes_values_through() {
        let query = build_everything_query(&raw("q=rust+lang&page=4&pageSize=99999"));
        assert_eq!(query.get("q"), Some("rust lang"));
        assert_eq!(query.get("page"), Some("4"));
        assert_eq!(query.get("pageSize"), Some("99999"));
    }

    #[test]
    fn test_top_headlines_with_category() {
        let query = build_top_headlines_query(&raw("category=sports"));
        assert_eq!(query.endpoint_path, "top-headlines");
        assert_eq!(
            query.parameters,
            vec![
                ("category", "sports".to_string()),
                ("language", "en".to_string()),
                ("page", "1".to_string()),
                ("pageSize", "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_top_headlines_default_category() {
        let query = build_top_headlines_query(&RawParams::default());
        assert_eq!(query.get("category"), Some("general"));
    }

    #[test]
    fn test_country_query() {
        let query = build_country_query("us", &raw("page=2"));
        assert_eq!(query.endpoint_path, "top-headlines");
        assert_eq!(
            query.parameters,
            vec![
                ("country", "us".to_string()),
                ("page", "2".to_string()),
                ("pageSize", "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_country_code_is_not_validated() {
        let query = build_country_query("not a country!", &RawParams::default());
        assert_eq!(query.get("country"), Some("not a country!"));
    }

    #[test]
    fn test_country_ignores_search_params() {
        let query = build_country_query("gb", &raw("q=ignored&category=ignored"));
        assert_eq!(query.get("q"), None);
        assert_eq!(query.get("category"), None);
    }
}
