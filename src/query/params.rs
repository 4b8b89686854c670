//! Inbound query parameters and numeric coercion.

use url::form_urlencoded;

/// Page number used when `page` is absent or unparsable.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when `pageSize` is absent or unparsable.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Loosely typed query parameters as received from the client.
///
/// Every field is optional. Unknown keys are ignored and the first
/// occurrence of a repeated key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl RawParams {
    /// Parse a raw (still percent-encoded) query string.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(query) = query else {
            return params;
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                "q" => &mut params.q,
                "category" => &mut params.category,
                "page" => &mut params.page,
                "pageSize" => &mut params.page_size,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        params
    }

    pub fn page(&self) -> i64 {
        coerce_int(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn page_size(&self) -> i64 {
        coerce_int(self.page_size.as_deref(), DEFAULT_PAGE_SIZE)
    }
}

/// Coerce a loosely typed value into an integer, falling back to `default`.
///
/// Reads an optional sign followed by the leading run of ASCII digits,
/// after skipping leading whitespace. Trailing characters are ignored.
/// No digits, a value of zero, or overflow all yield `default`. There is
/// no range clamping.
pub fn coerce_int(raw: Option<&str>, default: i64) -> i64 {
    let Some(raw) = raw else {
        return default;
    };

    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = unsigned
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return default;
    }

    let signed = if negative {
        format!("-{}", &unsigned[..digits_len])
    } else {
        unsigned[..digits_len].to_string()
    };

    match signed.parse::<i64>() {
        Ok(0) | Err(_) => default,
        Ok(value) => value,
    }
}
