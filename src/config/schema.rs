//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge service.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the edge service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Where identity and geo metadata are read from.
    pub edge: EdgeHeaders,

    /// Object store holding the flag images.
    pub store: StoreConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Response hardening.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Names of the headers the upstream gateway and edge network inject.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EdgeHeaders {
    /// Header carrying the authenticated user's identity.
    pub identity_header: String,

    /// Header carrying the visitor's country code.
    pub geo_header: String,
}

impl Default for EdgeHeaders {
    fn default() -> Self {
        Self {
            identity_header: "cf-access-authenticated-user-email".to_string(),
            geo_header: "cf-ipcountry".to_string(),
        }
    }
}

/// Filesystem object store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding `<code>.svg` objects and optional `.meta.json` sidecars.
    pub root: PathBuf,

    /// Cache-Control applied to objects without sidecar metadata.
    pub cache_control: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./flags"),
            cache_control: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Add `x-content-type-options` and `referrer-policy` to responses.
    pub enable_headers: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EdgeConfig = toml::from_str(
            r#"
            [store]
            root = "/srv/flags"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.root, PathBuf::from("/srv/flags"));
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.edge.identity_header, "cf-access-authenticated-user-email");
        assert_eq!(config.edge.geo_header, "cf-ipcountry");
        assert_eq!(config.timeouts.request_secs, 30);
        assert!(config.security.enable_headers);
        assert!(!config.observability.metrics_enabled);
    }
}
