//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Edge handler produces:
//!     → logging.rs (structured log events, per-request spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout log collection
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID is a field on every request span
//! - Metrics are cheap and silently dropped when no exporter is installed

pub mod logging;
pub mod metrics;
