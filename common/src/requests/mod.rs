//! Request payloads as they arrive over the wire.
//!
//! These types are deliberately loose: identifiers and source types are kept
//! as strings and the availability flag is optional, so that the backend's
//! validation layer can report shape problems with its own messages instead
//! of a generic deserialization failure.

use crate::model::source::Stability;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One source entry of an update payload.
///
/// `available` is the canonical flag. `unavailable` is the legacy, inverted
/// spelling. Any other key lands in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceUpdate {
    #[serde(rename = "type", alias = "name")]
    pub source_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unavailable: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl SourceUpdate {
    pub fn available(source_type: &str, available: bool) -> Self {
        Self {
            source_type: source_type.to_string(),
            available: Some(available),
            ..Self::default()
        }
    }
}

/// Body of the targeted update: sources of the connector named in the path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectorSourcesUpdate {
    pub sources: Vec<SourceUpdate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectorAndSourcesUpdate {
    #[serde(alias = "uuid")]
    pub id: String,
    pub sources: Vec<SourceUpdate>,
}

/// Body of the bulk update across many connectors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectorsAndSourcesUpdate {
    pub connectors: Vec<ConnectorAndSourcesUpdate>,
}

/// Connector-level attribute update. At least one attribute must be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectorUpdate {
    #[serde(alias = "uuid")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months_to_fetch: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectorsUpdate {
    pub connectors: Vec<ConnectorUpdate>,
}

/// Query string of the collection listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub all: Option<bool>,
    #[serde(alias = "uuid_connector")]
    pub connector_id: Option<String>,
}

/// Body of a connector create/replace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months_to_fetch: Option<i64>,
}

/// Body of a source create/replace under the connector named in the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceBody {
    #[serde(rename = "type", alias = "name")]
    pub source_type: String,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<Stability>,
}
