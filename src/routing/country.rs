//! Country codes taken from request paths.

use std::fmt;

/// Extension appended to every flag object key.
pub const FLAG_EXTENSION: &str = ".svg";

/// A country code as it appeared in the request path.
///
/// Untyped user input: nothing is validated, and the original casing is kept
/// for display. Only [`CountryCode::storage_key`] normalises it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Everything after the final `/` of `path`.
    pub fn from_path(path: &str) -> Self {
        let segment = path.rsplit('/').next().unwrap_or_default();
        Self::new(segment)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Object store key for this code: `lowercase(code) + ".svg"`.
    pub fn storage_key(&self) -> String {
        let mut key = self.0.to_lowercase();
        key.push_str(FLAG_EXTENSION);
        key
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
