//! Outbound call execution against the news API.
//!
//! # Responsibilities
//! - Assemble the target URL: base + endpoint path + parameters + `apiKey`
//! - Issue exactly one GET per inbound request
//! - Map success, upstream error, and transport failure to an envelope
//!
//! # Design Decisions
//! - The reqwest client keeps its defaults (timeouts, redirects)
//! - The envelope status is fixed to 200 on success unless pass-through
//!   is configured
//! - Bodies that are not JSON are carried as JSON strings

use std::time::Instant;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::query::OutboundQuery;
use crate::upstream::envelope::ResponseEnvelope;
use crate::upstream::error::{ExecutorError, UpstreamFailure};

/// Query parameter carrying the credential. Always appended last.
pub const CREDENTIAL_PARAM: &str = "apiKey";

/// Characters escaped in query keys and values: everything except the
/// RFC 3986 unreserved marks `- _ . ! ~ * ( )`. A space becomes `%20`.
/// `'` is escaped too, since `Url` would rewrite it in an http query anyway.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// Status reported for every upstream 2xx unless pass-through is enabled.
const FIXED_SUCCESS_STATUS: u16 = 200;

/// Executes normalized queries against the upstream API.
///
/// Holds a pooled HTTP client and the read-only credential. Cheap to share
/// behind an `Arc`; every call is independent.
pub struct UpstreamExecutor {
    client: reqwest::Client,
    base_url: Url,
    credential: String,
    pass_through_success_status: bool,
}

impl UpstreamExecutor {
    /// Create an executor from validated upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ExecutorError> {
        let mut builder = reqwest::Client::builder();
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            base_url: normalize_base(&config.base_url)?,
            credential: config.api_key.clone(),
            pass_through_success_status: config.pass_through_success_status,
        })
    }

    /// Build the full target URL for a query, credential included.
    pub fn target_url(&self, query: &OutboundQuery) -> Result<Url, url::ParseError> {
        let mut url = self.base_url.join(query.endpoint_path)?;
        let encoded = query
            .parameters
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
            .chain(std::iter::once((CREDENTIAL_PARAM, self.credential.as_str())))
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_COMPONENT),
                    utf8_percent_encode(value, QUERY_COMPONENT)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        url.set_query(Some(&encoded));
        Ok(url)
    }

    /// Perform one upstream call and fold the outcome into an envelope.
    ///
    /// Never fails: upstream errors and transport failures are returned as
    /// failure envelopes and logged.
    pub async fn execute(&self, query: &OutboundQuery) -> ResponseEnvelope {
        let start = Instant::now();

        match self.fetch(query).await {
            Ok((status, body)) => {
                tracing::debug!(
                    endpoint = query.endpoint_path,
                    upstream_status = status,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream call succeeded"
                );
                let status = if self.pass_through_success_status {
                    status
                } else {
                    FIXED_SUCCESS_STATUS
                };
                ResponseEnvelope::success(status, body)
            }
            Err(failure) => {
                match &failure {
                    UpstreamFailure::Status { status, body } => tracing::error!(
                        endpoint = query.endpoint_path,
                        upstream_status = status,
                        error = %body,
                        "API request error"
                    ),
                    other => tracing::error!(
                        endpoint = query.endpoint_path,
                        error = %other,
                        "API request error"
                    ),
                }
                metrics::record_upstream_failure(failure.kind());
                failure.into_envelope()
            }
        }
    }

    async fn fetch(&self, query: &OutboundQuery) -> Result<(u16, Value), UpstreamFailure> {
        let url = self.target_url(query)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let body = parse_body(&bytes);

        if status.is_success() {
            Ok((status.as_u16(), body))
        } else {
            Err(UpstreamFailure::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

impl std::fmt::Debug for UpstreamExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamExecutor")
            .field("base_url", &self.base_url.as_str())
            .field("pass_through_success_status", &self.pass_through_success_status)
            .finish_non_exhaustive()
    }
}

/// Parse the base URL and make sure relative joins land beneath it.
fn normalize_base(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    Ok(url)
}

/// JSON when the body parses, otherwise the raw text as a JSON string.
fn parse_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
