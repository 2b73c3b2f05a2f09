use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound for `months_to_fetch`, in months of history.
pub const MAX_MONTHS_TO_FETCH: u32 = 24;

/// A top-level external data-source integration.
///
/// Only `id` is mandatory. The descriptive attributes are optional because
/// fixture revisions differ in which of them they carry; an absent attribute
/// is omitted from the JSON output rather than serialized as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    /// Unique identifier, immutable once the connector exists.
    #[serde(alias = "uuid")]
    pub id: Uuid,
    /// Whether the connector is hidden from end users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    /// Number of months of history retrieved during synchronization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months_to_fetch: Option<u32>,
}

impl Connector {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            hidden: None,
            months_to_fetch: None,
        }
    }
}

/// Response body for connector-level attribute updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorsList {
    pub connectors: Vec<Connector>,
}
