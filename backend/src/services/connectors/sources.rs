//! # Flat Source Listing Service
//!
//! Serves `GET /connectors/{connector_id}/sources`, the older read shape in
//! which every source repeats its owning `connector_id`.

use crate::error::ApiError;
use crate::registry::identity::resolve_connector;
use crate::registry::validation::parse_connector_id;
use crate::store::RecordStore;
use actix_web::{web, HttpResponse};
use common::model::source::SourcesList;

/// Actix web handler for the flat source listing.
///
/// An existing connector without sources yields `{"sources": []}`; an
/// unknown connector is a `404`.
pub(crate) async fn process(
    store: web::Data<RecordStore>,
    connector_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_connector_id(&connector_id)?;
    let collections = store.read().await;
    let connector = resolve_connector(&collections, &id)?;
    let sources = collections
        .list_sources_for(connector.id)
        .cloned()
        .collect();
    Ok(HttpResponse::Ok().json(SourcesList { sources }))
}
