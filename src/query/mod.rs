//! Request normalization subsystem.
//!
//! # Data Flow
//! ```text
//! inbound query string (untrusted, loosely typed)
//!     → params.rs (split into RawParams, coerce page/pageSize)
//!     → builder.rs (apply per-route defaults)
//!     → OutboundQuery (endpoint path + ordered parameters)
//!     → handed to the upstream executor
//! ```
//!
//! # Design Decisions
//! - Normalization never fails: malformed input is replaced by defaults
//! - Parameter order is fixed per route so outbound URLs are stable
//! - Values stay raw here; encoding happens when the URL is assembled

pub mod builder;
pub mod params;

pub use builder::{
    build_country_query, build_everything_query, build_top_headlines_query, OutboundQuery,
};
pub use params::{coerce_int, RawParams, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
