//! # Connector and Source Deletion Service
//!
//! Backs `DELETE /connectors/{connector_id}` and
//! `DELETE /connectors/{connector_id}/sources/{source_type}`.
//!
//! ## Workflow
//!
//! 1.  **Capability Check**: `Capabilities::require_delete` answers
//!     `403 Forbidden` while deletion is disabled, before the store is
//!     touched.
//!
//! 2.  **Resolution**: the connector, and for the source route the source,
//!     must exist (`404` otherwise).
//!
//! 3.  **Removal**: a connector goes together with all of its sources.
//!
//! 4.  **HTTP Response**: the removed aggregate for a connector, the
//!     remaining aggregate for a source.

use crate::config::Capabilities;
use crate::error::ApiError;
use crate::registry::lifecycle::{delete_connector, delete_source};
use crate::registry::validation::{parse_connector_id, parse_source_type};
use crate::store::RecordStore;
use actix_web::{web, HttpResponse};
use log::info;

/// Actix web handler for `DELETE /connectors/{connector_id}`.
///
/// # Arguments
/// * `capabilities` - The deployment's capability table.
/// * `connector_id` - The connector UUID, extracted from the URL path.
///
/// # Returns
/// - `200 OK` with the aggregate as it was before removal.
/// - `403 Forbidden` while deletion is disabled.
/// - `404 Not Found` for an unknown connector.
pub(crate) async fn connector(
    store: web::Data<RecordStore>,
    capabilities: web::Data<Capabilities>,
    connector_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    capabilities.require_delete()?;
    let id = parse_connector_id(&connector_id)?;
    let mut collections = store.write().await;
    let removed = delete_connector(&mut collections, &id)?;
    info!("Connector {} deleted with {} source(s)", id, removed.sources.len());
    Ok(HttpResponse::Ok().json(removed))
}

/// `DELETE /connectors/{connector_id}/sources/{source_type}`: requires the
/// `delete` capability. Responds with the connector's remaining aggregate.
pub(crate) async fn source(
    store: web::Data<RecordStore>,
    capabilities: web::Data<Capabilities>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    capabilities.require_delete()?;
    let (connector_id, source_type) = path.into_inner();
    let id = parse_connector_id(&connector_id)?;
    let source_type = parse_source_type(&source_type)?;
    let mut collections = store.write().await;
    let remaining = delete_source(&mut collections, &id, source_type)?;
    info!("Connector {}: source '{}' deleted", id, source_type);
    Ok(HttpResponse::Ok().json(remaining))
}
