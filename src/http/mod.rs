//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, wildcard route, routing decision)
//!     → forward.rs (URI rewrite, Host rewrite, upstream dispatch)
//!     → [capture layer persists the response when enabled]
//!     → Send to client
//! ```

pub mod forward;
pub mod server;

pub use server::{AppState, HttpServer};
