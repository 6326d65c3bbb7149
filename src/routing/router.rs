//! Route lookup.
//!
//! # Responsibilities
//! - Classify a request path into one of three terminal outcomes
//! - Extract the country code for flag lookups
//!
//! # Design Decisions
//! - Pure function of the path (no state, no allocation beyond the code)
//! - First match wins: flag, then identity page, then not found
//! - Explicit NotFound rather than silent default

use crate::routing::country::CountryCode;

/// Path of the identity confirmation page.
pub const SECURE_PATH: &str = "/secure";

/// Marker that turns a path into a flag lookup.
pub const FLAG_MARKER: &str = "/secure/";

/// Outcome of routing a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Serve the flag image for this code from the object store.
    Flag(CountryCode),
    /// Render the identity confirmation page.
    IdentityPage,
    /// Anything else.
    NotFound,
}

impl Route {
    /// Decide what to do with `path`.
    pub fn classify(path: &str) -> Self {
        if path.contains(FLAG_MARKER) && path != SECURE_PATH {
            return Route::Flag(CountryCode::from_path(path));
        }

        if path == SECURE_PATH {
            return Route::IdentityPage;
        }

        Route::NotFound
    }

    /// Short label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Route::Flag(_) => "flag",
            Route::IdentityPage => "identity",
            Route::NotFound => "not_found",
        }
    }
}
