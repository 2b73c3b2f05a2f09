use crate::model::source::ConnectorSource;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A connector joined with its sources, built at read time.
///
/// Sources appear in store order and never repeat a `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorAndSources {
    #[serde(alias = "uuid")]
    pub id: Uuid,
    pub sources: Vec<ConnectorSource>,
}

/// A slice of the aggregate collection.
///
/// `total` counts the records matching the request filter, before
/// pagination is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorsAndSourcesList {
    pub connectors: Vec<ConnectorAndSources>,
    pub total: usize,
}

impl ConnectorsAndSourcesList {
    /// Wraps a complete, unpaginated set.
    pub fn complete(connectors: Vec<ConnectorAndSources>) -> Self {
        let total = connectors.len();
        Self { connectors, total }
    }
}
