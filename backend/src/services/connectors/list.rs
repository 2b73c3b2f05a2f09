//! # Connector Listing Service
//!
//! Serves `GET /connectors`, the paginated view over every connector and its
//! sources.
//!
//! ## Workflow
//!
//! 1.  **Query Parsing**: `page`, `limit`, `all` and `connector_id` arrive as
//!     query parameters. `validate_list_query` applies the defaults (page 1,
//!     limit 50) and rejects values below 1.
//!
//! 2.  **Filtering**: with `connector_id` set, the view narrows to that one
//!     connector, failing with `404` when it does not exist.
//!
//! 3.  **Slicing**: `list_page` counts the filtered set, then slices it
//!     unless `all=true`. A page past the end is an empty list, not an error.
//!
//! 4.  **HTTP Response**: `200 OK` with `{"connectors": [...], "total": n}`.

use crate::error::ApiError;
use crate::registry::validation::validate_list_query;
use crate::registry::view::list_page;
use crate::store::RecordStore;
use actix_web::{web, HttpResponse};
use common::requests::ListQuery;

/// Actix web handler for `GET /connectors`.
///
/// # Arguments
/// * `query` - Paging and filter parameters from the query string.
///
/// # Returns
/// - `200 OK` with a `ConnectorsAndSourcesList`.
/// - `404 Not Found` when the `connector_id` filter names no connector.
/// - `422 Unprocessable Entity` for malformed or out-of-range parameters.
pub(crate) async fn process(
    store: web::Data<RecordStore>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let request = validate_list_query(&query)?;
    let collections = store.read().await;
    let page = list_page(&collections, &request)?;
    Ok(HttpResponse::Ok().json(page))
}
