//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON)
//!     → loader.rs (parse & deserialize)
//!     → ProxyConfig (immutable)
//!     → shared via Arc to all request handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload mechanism
//! - Only `mappings` is required; everything else has serde defaults,
//!   so a minimal `{"mappings": {...}}` file is a valid config
//! - Load failure is fatal at startup, never partial

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{CaptureConfig, ProxyConfig};
