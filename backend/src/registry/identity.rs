//! Resolves connectors by id and sources by `(connector_id, type)`.
//!
//! A key that matches more than one record is reported as `Conflict`
//! instead of picking one: it means the fixture data is broken.

use crate::error::ApiError;
use crate::store::Collections;
use common::model::connector::Connector;
use common::model::source::{Source, SourceType};
use uuid::Uuid;

pub fn resolve_connector<'a>(
    collections: &'a Collections,
    id: &Uuid,
) -> Result<&'a Connector, ApiError> {
    let mut matches = collections.connectors_with_id(*id);
    let found = matches
        .next()
        .ok_or_else(|| ApiError::NotFound(format!("Connector {} not found", id)))?;
    if matches.next().is_some() {
        return Err(ApiError::Conflict(format!(
            "Multiple connectors found with id {}",
            id
        )));
    }
    Ok(found)
}

pub fn resolve_source<'a>(
    collections: &'a Collections,
    connector_id: &Uuid,
    source_type: SourceType,
) -> Result<&'a Source, ApiError> {
    let mut matches = collections.sources_with_key(*connector_id, source_type);
    let found = matches.next().ok_or_else(|| {
        ApiError::NotFound(format!(
            "Source '{}' not found for connector {}",
            source_type, connector_id
        ))
    })?;
    if matches.next().is_some() {
        return Err(ApiError::Conflict(format!(
            "Multiple '{}' sources found for connector {}",
            source_type, connector_id
        )));
    }
    Ok(found)
}
