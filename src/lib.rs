//! News relay library.
//!
//! A small HTTP relay in front of a news-aggregation API: three GET routes
//! whose queries are normalized, forwarded with a server-held credential,
//! and answered with a uniform JSON envelope.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod query;
pub mod upstream;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use query::OutboundQuery;
pub use upstream::{ResponseEnvelope, UpstreamExecutor};
