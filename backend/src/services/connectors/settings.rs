//! # Connector Settings Service
//!
//! Serves `PATCH /connectors/settings`, which updates connector-level
//! attributes rather than sources. The route is registered ahead of
//! `/{connector_id}` in `configure_routes`.
//!
//! ## Workflow
//!
//! 1.  **Validation**: each entry needs an id and at least one of `hidden`
//!     and `months_to_fetch`; the latter must lie in `1..=24`. Unknown keys
//!     are rejected while the body is deserialized.
//!
//! 2.  **Merge**: `apply_connector_changes` stages every entry, repeated ids
//!     building on the previous staged copy, then commits.
//!
//! 3.  **HTTP Response**: `200 OK` with `{"connectors": [...]}`.

use crate::error::ApiError;
use crate::registry::reconcile::apply_connector_changes;
use crate::registry::validation::validate_connectors_update;
use crate::store::RecordStore;
use actix_web::{web, HttpResponse};
use common::model::connector::ConnectorsList;
use common::requests::ConnectorsUpdate;
use log::info;

/// Actix web handler for `PATCH /connectors/settings`.
///
/// # Returns
/// - `200 OK` with the resulting connectors, once each.
/// - `404 Not Found` for an unknown connector; nothing is written.
/// - `422 Unprocessable Entity` for an empty or out-of-range entry.
pub(crate) async fn process(
    store: web::Data<RecordStore>,
    payload: web::Json<ConnectorsUpdate>,
) -> Result<HttpResponse, ApiError> {
    let changes = validate_connectors_update(&payload)?;
    let mut collections = store.write().await;
    let connectors = apply_connector_changes(&mut collections, &changes)?;
    info!("Connector settings updated for {} connector(s)", connectors.len());
    Ok(HttpResponse::Ok().json(ConnectorsList { connectors }))
}
