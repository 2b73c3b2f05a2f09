//! # Connector Retrieval Service
//!
//! Serves `GET /connectors/{connector_id}`: one connector joined with its
//! sources.
//!
//! ## Workflow
//!
//! 1.  **HTTP Request**: the connector id is taken from the URL path and
//!     parsed as a UUID.
//!
//! 2.  **Aggregate Assembly**: under a read lock, `get_connector_and_sources`
//!     resolves the connector and collects its sources in store order.
//!
//! 3.  **HTTP Response**: `200 OK` with the aggregate. A connector without
//!     sources is returned with an empty `sources` list; an unknown id is a
//!     `404`.

use crate::error::ApiError;
use crate::registry::reconcile::get_connector_and_sources;
use crate::registry::validation::parse_connector_id;
use crate::store::RecordStore;
use actix_web::{web, HttpResponse};

/// Actix web handler for `GET /connectors/{connector_id}`.
///
/// # Arguments
/// * `connector_id` - The connector UUID, extracted from the URL path.
///
/// # Returns
/// - `200 OK` with the `ConnectorAndSources` aggregate.
/// - `404 Not Found` when no connector has this id.
/// - `422 Unprocessable Entity` when the id is not a UUID.
pub(crate) async fn process(
    store: web::Data<RecordStore>,
    connector_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_connector_id(&connector_id)?;
    let collections = store.read().await;
    Ok(HttpResponse::Ok().json(get_connector_and_sources(&collections, &id)?))
}
