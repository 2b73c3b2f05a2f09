//! Runtime configuration, read once from the environment in `main.rs`.
//!
//! Every variable is optional. A value that fails to parse is ignored with a
//! warning and the default is used instead.

use crate::error::ApiError;
use log::warn;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_JSON_LIMIT: usize = 1024 * 1024; // 1 MB

/// Operations that exist in the API but are switched off unless enabled.
///
/// Handlers for create/replace and delete consult this table before touching
/// the store, so turning them on is a configuration change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub create: bool,
    pub delete: bool,
}

impl Capabilities {
    pub fn require_create(&self) -> Result<(), ApiError> {
        if self.create {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "Creating or replacing connectors and sources is disabled".to_string(),
            ))
        }
    }

    pub fn require_delete(&self) -> Result<(), ApiError> {
        if self.delete {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "Deleting connectors and sources is disabled".to_string(),
            ))
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `connectors.json` and `sources.json`. When unset
    /// the fixtures embedded in the binary are used.
    pub fixtures_dir: Option<PathBuf>,
    pub json_limit: usize,
    pub capabilities: Capabilities,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            fixtures_dir: None,
            json_limit: DEFAULT_JSON_LIMIT,
            capabilities: Capabilities::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            host: get("CONNECTORS_HOST").unwrap_or(defaults.host),
            port: parse_or("CONNECTORS_PORT", get("CONNECTORS_PORT"), defaults.port),
            fixtures_dir: get("CONNECTORS_FIXTURES_DIR").map(PathBuf::from),
            json_limit: parse_or(
                "CONNECTORS_JSON_LIMIT",
                get("CONNECTORS_JSON_LIMIT"),
                defaults.json_limit,
            ),
            capabilities: Capabilities {
                create: parse_flag("CONNECTORS_ENABLE_CREATE", get("CONNECTORS_ENABLE_CREATE")),
                delete: parse_flag("CONNECTORS_ENABLE_DELETE", get("CONNECTORS_ENABLE_DELETE")),
            },
        }
    }

    pub fn bind_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid value '{}' for {}", value, key);
            default
        }),
        None => default,
    }
}

fn parse_flag(key: &str, raw: Option<String>) -> bool {
    match raw.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => false,
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        Some(v) => {
            warn!("Ignoring invalid value '{}' for {}", v, key);
            false
        }
    }
}
