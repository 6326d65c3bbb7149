//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (classify path)
//!     → country.rs (extract code, derive storage key)
//!     → Return: Flag(code) | IdentityPage | NotFound
//! ```
//!
//! # Design Decisions
//! - No regex in hot path (substring and equality checks only)
//! - Deterministic: same path always yields the same route
//! - First match wins

pub mod country;
pub mod router;

pub use country::{CountryCode, FLAG_EXTENSION};
pub use router::Route;
