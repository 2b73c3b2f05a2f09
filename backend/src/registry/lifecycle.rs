//! Create, replace and delete of connectors and sources.
//!
//! These are the implementations behind the PUT and DELETE routes. The
//! routes check `Capabilities` first and answer `Forbidden` while the
//! matching capability is off, so nothing here runs in a default
//! deployment.

use crate::error::ApiError;
use crate::registry::identity::{resolve_connector, resolve_source};
use crate::registry::reconcile::{build_aggregate, get_connector_and_sources};
use crate::store::Collections;
use common::model::aggregate::ConnectorAndSources;
use common::model::connector::Connector;
use common::model::source::{Source, SourceType};
use uuid::Uuid;

/// Whether a put inserted a new record or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Replaced,
}

/// Inserts the connector, or replaces the attributes of the existing one.
pub fn put_connector(
    collections: &mut Collections,
    connector: Connector,
) -> Result<(ConnectorAndSources, Upsert), ApiError> {
    let id = connector.id;
    let outcome = match resolve_connector(collections, &id) {
        Ok(_) => Upsert::Replaced,
        Err(ApiError::NotFound(_)) => Upsert::Created,
        Err(e) => return Err(e),
    };
    match outcome {
        Upsert::Replaced => {
            collections.replace_connector(connector);
        }
        Upsert::Created => collections.insert_connector(connector),
    }
    Ok((get_connector_and_sources(collections, &id)?, outcome))
}

/// Inserts or replaces a source under an existing connector.
pub fn put_source(
    collections: &mut Collections,
    source: Source,
) -> Result<(ConnectorAndSources, Upsert), ApiError> {
    let connector_id = source.connector_id;
    resolve_connector(collections, &connector_id)?;
    let outcome = match resolve_source(collections, &connector_id, source.source_type) {
        Ok(_) => Upsert::Replaced,
        Err(ApiError::NotFound(_)) => Upsert::Created,
        Err(e) => return Err(e),
    };
    match outcome {
        Upsert::Replaced => {
            collections.replace_source(source);
        }
        Upsert::Created => collections.insert_source(source),
    }
    Ok((get_connector_and_sources(collections, &connector_id)?, outcome))
}

/// Removes a connector with all its sources and returns what was removed.
pub fn delete_connector(
    collections: &mut Collections,
    id: &Uuid,
) -> Result<ConnectorAndSources, ApiError> {
    let removed = build_aggregate(collections, resolve_connector(collections, id)?);
    collections.remove_connector(*id);
    Ok(removed)
}

/// Removes one source and returns its connector's remaining aggregate.
pub fn delete_source(
    collections: &mut Collections,
    connector_id: &Uuid,
    source_type: SourceType,
) -> Result<ConnectorAndSources, ApiError> {
    resolve_connector(collections, connector_id)?;
    resolve_source(collections, connector_id, source_type)?;
    collections.remove_source(*connector_id, source_type);
    get_connector_and_sources(collections, connector_id)
}
