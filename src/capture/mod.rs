//! Response capture subsystem.
//!
//! # Data Flow
//! ```text
//! Upstream response (fully buffered)
//!     → store.rs (build CapturedResponse record)
//!     → JSON artifact on disk: {service}-{sanitizedPath}-{timestamp}.json
//! Client still receives the original bytes unchanged.
//! ```
//!
//! # Design Decisions
//! - Persistence is best-effort: any failure is logged as a warning
//!   and never alters the client-visible response
//! - The write completes before the response is released to the
//!   client; a slow filesystem adds latency to that request only
//! - Filenames carry a millisecond timestamp; two captures of the
//!   same service+path within the same millisecond collide on the
//!   filename. Kept as-is since downstream tooling parses the
//!   filename pattern.

pub mod store;

pub use store::{CaptureError, CaptureStore, CapturedResponse};
