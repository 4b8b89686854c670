//! Relay route handlers.
//!
//! Each handler normalizes its inbound parameters, hands the resulting
//! query to the upstream executor, and returns the envelope as is.

use std::time::Instant;

use axum::extract::{Path, RawQuery, State};

use crate::http::request::RequestId;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::query::{
    build_country_query, build_everything_query, build_top_headlines_query, OutboundQuery,
    RawParams,
};
use crate::upstream::ResponseEnvelope;

pub const ALL_NEWS_ROUTE: &str = "/all-news";
pub const TOP_HEADLINES_ROUTE: &str = "/top-headlines";
pub const COUNTRY_ROUTE: &str = "/country/{iso}";

/// `GET /all-news?q=&page=&pageSize=`
pub async fn all_news(
    State(state): State<AppState>,
    request_id: RequestId,
    RawQuery(query): RawQuery,
) -> ResponseEnvelope {
    let params = RawParams::from_query(query.as_deref());
    relay(&state, ALL_NEWS_ROUTE, &request_id, build_everything_query(&params)).await
}

/// `GET /top-headlines?category=&page=&pageSize=`
pub async fn top_headlines(
    State(state): State<AppState>,
    request_id: RequestId,
    RawQuery(query): RawQuery,
) -> ResponseEnvelope {
    let params = RawParams::from_query(query.as_deref());
    relay(&state, TOP_HEADLINES_ROUTE, &request_id, build_top_headlines_query(&params)).await
}

/// `GET /country/{iso}?page=&pageSize=`
pub async fn country(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(iso): Path<String>,
    RawQuery(query): RawQuery,
) -> ResponseEnvelope {
    let params = RawParams::from_query(query.as_deref());
    relay(&state, COUNTRY_ROUTE, &request_id, build_country_query(&iso, &params)).await
}

async fn relay(
    state: &AppState,
    route: &'static str,
    request_id: &RequestId,
    query: OutboundQuery,
) -> ResponseEnvelope {
    let start = Instant::now();
    tracing::debug!(
        request_id = %request_id,
        route,
        endpoint = query.endpoint_path,
        "Relaying request"
    );

    let envelope = state.executor.execute(&query).await;

    metrics::record_request(route, envelope.status, start);
    tracing::debug!(
        request_id = %request_id,
        route,
        status = envelope.status,
        success = envelope.success,
        "Relay complete"
    );
    envelope
}
