//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, edge handler)
//!     → middleware.rs (request metrics)
//!     → request.rs (request ID)
//!     → routing (classify path)
//!     → page.rs (identity page) | store lookup
//!     → response.rs (status, headers, body)
//!     → Send to client
//! ```

pub mod middleware;
pub mod page;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
