//! Service-name extraction and mapping lookup.
//!
//! # Responsibilities
//! - Split a request path into (service name, remainder path)
//! - Resolve the service name against the static mapping
//! - Reject unknown services with an explicit decision, not a default

use std::collections::HashMap;

/// Service name → upstream base URL.
pub type Mappings = HashMap<String, String>;

/// Outcome of resolving a request path against the mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// The path produced no segments at all. `splitn` yields one
    /// (empty) element even for an empty string, so in practice an
    /// empty or "/" path resolves to `NotFound("")` instead; this
    /// variant is kept for the 400 branch of the handler.
    Invalid,

    /// No mapping entry for the extracted service name.
    NotFound(String),

    /// The service name matched a mapping entry.
    Resolved {
        /// Mapping key that matched.
        service: String,
        /// Configured upstream base URL, unparsed.
        target: String,
        /// Path to request from the upstream; always starts with
        /// exactly one '/', and is "/" when nothing followed the
        /// service name.
        remainder: String,
    },
}

/// Resolve a raw request path to a routing decision.
///
/// The first path segment (after stripping a single leading '/') is
/// the service name; everything after the next '/' is the remainder.
/// Lookup is case-sensitive.
pub fn resolve(path: &str, mappings: &Mappings) -> RouteDecision {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let mut parts = trimmed.splitn(2, '/');

    let service = match parts.next() {
        Some(s) => s,
        None => return RouteDecision::Invalid,
    };

    let target = match mappings.get(service) {
        Some(t) => t.clone(),
        None => return RouteDecision::NotFound(service.to_string()),
    };

    RouteDecision::Resolved {
        service: service.to_string(),
        target,
        remainder: format!("/{}", parts.next().unwrap_or("")),
    }
}
