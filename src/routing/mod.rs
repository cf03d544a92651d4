//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → resolver.rs (split into service name + remainder)
//!     → mapping lookup
//!     → Return: RouteDecision (Invalid / NotFound / Resolved)
//! ```
//!
//! # Design Decisions
//! - Resolution is a pure function over the immutable mapping;
//!   no shared mutable state, safe for concurrent use without locks
//! - A tagged decision enum instead of ad hoc error juggling; each
//!   variant maps to exactly one HTTP outcome in the handler
//! - The configured target URL is passed through as a string; parsing
//!   and validation happen at dispatch time in the forwarder

pub mod resolver;

pub use resolver::{resolve, Mappings, RouteDecision};
