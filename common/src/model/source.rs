use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The closed set of access channels a connector can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    OpenApi,
    Fallback,
    DirectAccess,
}

impl SourceType {
    pub const ALL: [SourceType; 3] = [
        SourceType::OpenApi,
        SourceType::Fallback,
        SourceType::DirectAccess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::OpenApi => "openapi",
            SourceType::Fallback => "fallback",
            SourceType::DirectAccess => "directaccess",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known `SourceType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSourceType(pub String);

impl fmt::Display for UnknownSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected: Vec<&str> = SourceType::ALL.iter().map(|t| t.as_str()).collect();
        write!(
            f,
            "unknown source type '{}' (expected one of: {})",
            self.0,
            expected.join(", ")
        )
    }
}

impl std::error::Error for UnknownSourceType {}

impl FromStr for SourceType {
    type Err = UnknownSourceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownSourceType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StabilityStatus {
    Stable,
    Unstable,
    Down,
    #[default]
    Unknown,
}

/// Last observed operational stability of a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stability {
    #[serde(default)]
    pub status: StabilityStatus,
    /// Formatted as `YYYY-MM-DD HH:MM:SS`.
    pub last_update: String,
}

/// A source as stored: one row per `(connector_id, source_type)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(alias = "uuid_connector")]
    pub connector_id: Uuid,
    #[serde(rename = "type", alias = "name")]
    pub source_type: SourceType,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<Stability>,
}

impl Source {
    /// Drops the owning connector reference, for use inside an aggregate.
    pub fn to_connector_source(&self) -> ConnectorSource {
        ConnectorSource {
            source_type: self.source_type,
            available: self.available,
            stability: self.stability.clone(),
        }
    }
}

/// A source as seen nested under its connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorSource {
    #[serde(rename = "type", alias = "name")]
    pub source_type: SourceType,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<Stability>,
}

/// Flat listing of one connector's sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesList {
    pub sources: Vec<Source>,
}
