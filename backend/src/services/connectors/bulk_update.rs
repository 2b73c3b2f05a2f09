//! # Bulk Availability Update Service
//!
//! Serves `PATCH /connectors`: availability changes for sources spread over
//! many connectors, applied as one batch.
//!
//! ## Workflow
//!
//! 1.  **Payload Validation**: `validate_bulk_update` parses every connector
//!     id, checks each source `type` against the closed set, requires an
//!     availability flag and inverts the legacy `unavailable` one. Nothing
//!     touches the store yet.
//!
//! 2.  **Planning**: under the write lock, `apply_source_changes` resolves
//!     every connector and source and builds the merged copies. Any unknown
//!     connector or source type aborts the batch here.
//!
//! 3.  **Commit**: the merged records are written back in payload order, so
//!     a later entry for the same source wins.
//!
//! 4.  **HTTP Response**: `200 OK` with the aggregate of each touched
//!     connector, listed once.

use crate::error::ApiError;
use crate::registry::reconcile::apply_source_changes;
use crate::registry::validation::validate_bulk_update;
use crate::store::RecordStore;
use actix_web::{web, HttpResponse};
use common::model::aggregate::ConnectorsAndSourcesList;
use common::requests::ConnectorsAndSourcesUpdate;
use log::info;

/// Actix web handler for `PATCH /connectors`.
///
/// # Arguments
/// * `payload` - `{"connectors": [{"id", "sources": [{"type", "available"}]}]}`.
///
/// # Returns
/// - `200 OK` with a `ConnectorsAndSourcesList` of the touched connectors.
/// - `404 Not Found` when a connector or source does not exist.
/// - `422 Unprocessable Entity` for shape errors.
/// - `501 Not Implemented` when a withheld source attribute is submitted.
pub(crate) async fn process(
    store: web::Data<RecordStore>,
    payload: web::Json<ConnectorsAndSourcesUpdate>,
) -> Result<HttpResponse, ApiError> {
    let changes = validate_bulk_update(&payload)?;
    let mut collections = store.write().await;
    let updated = apply_source_changes(&mut collections, &changes)?;
    info!(
        "Bulk update: {} source change(s) applied across {} connector(s)",
        changes.iter().map(|c| c.sources.len()).sum::<usize>(),
        updated.len()
    );
    Ok(HttpResponse::Ok().json(ConnectorsAndSourcesList::complete(updated)))
}
