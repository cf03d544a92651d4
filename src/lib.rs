//! Path-prefix routing reverse proxy with optional response capture.

pub mod capture;
pub mod config;
pub mod http;
pub mod routing;

pub use capture::CaptureStore;
pub use config::ProxyConfig;
pub use http::HttpServer;
