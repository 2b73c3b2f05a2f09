//! # Targeted Availability Update Service
//!
//! Serves `PATCH /connectors/{connector_id}`. It shares validation and merge
//! rules with the bulk update but is scoped to the connector in the path.
//!
//! ## Workflow
//!
//! 1.  **Validation**: the path id is parsed and every source entry goes
//!     through `validate_source_updates`.
//!
//! 2.  **Merge**: `apply_connector_source_changes` resolves and merges all
//!     entries before writing any of them.
//!
//! 3.  **HTTP Response**: `200 OK` with the connector's updated aggregate.

use crate::error::ApiError;
use crate::registry::reconcile::apply_connector_source_changes;
use crate::registry::validation::{
    parse_connector_id, validate_source_updates, ConnectorSourcesChange,
};
use crate::store::RecordStore;
use actix_web::{web, HttpResponse};
use common::requests::ConnectorSourcesUpdate;
use log::info;

/// Actix web handler for `PATCH /connectors/{connector_id}`.
///
/// # Arguments
/// * `connector_id` - The connector UUID, extracted from the URL path.
/// * `payload` - `{"sources": [{"type", "available"}]}`.
///
/// # Returns
/// - `200 OK` with the updated `ConnectorAndSources`.
/// - `404`, `422` or `501` as for the bulk update.
pub(crate) async fn process(
    store: web::Data<RecordStore>,
    connector_id: web::Path<String>,
    payload: web::Json<ConnectorSourcesUpdate>,
) -> Result<HttpResponse, ApiError> {
    let change = ConnectorSourcesChange {
        connector_id: parse_connector_id(&connector_id)?,
        sources: validate_source_updates(&payload.sources)?,
    };
    let mut collections = store.write().await;
    let updated = apply_connector_source_changes(&mut collections, &change)?;
    info!(
        "Connector {}: {} source change(s) applied",
        change.connector_id,
        change.sources.len()
    );
    Ok(HttpResponse::Ok().json(updated))
}
