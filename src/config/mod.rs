//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → loader.rs (optional TOML file, then API_KEY / PORT from .env and the environment)
//!     → validation.rs (semantic checks, all errors collected)
//!     → RelayConfig (validated, immutable)
//!     → consumed once at startup by the server and the upstream executor
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults except the upstream credential
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_dotenv, ConfigError, EnvOverrides};
pub use schema::{
    CorsConfig, ListenerConfig, LogFormat, ObservabilityConfig, RelayConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
