//! Edge identity page and flag image service.

pub mod config;
pub mod edge;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::EdgeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
