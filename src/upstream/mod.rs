//! Upstream proxying subsystem.
//!
//! # Data Flow
//! ```text
//! OutboundQuery
//!     → executor.rs (join base URL, path, parameters, credential)
//!     → one GET against the news API
//!     → error.rs (classify status / transport failures)
//!     → envelope.rs (fold every outcome into a ResponseEnvelope)
//! ```
//!
//! # Design Decisions
//! - Single attempt per request: no retry, no timeout override
//! - Failures never escape the executor; they become envelopes
//! - The credential is injected at construction and never logged

pub mod envelope;
pub mod error;
pub mod executor;

pub use envelope::ResponseEnvelope;
pub use error::{ExecutorError, UpstreamFailure};
pub use executor::UpstreamExecutor;
