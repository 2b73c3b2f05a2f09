//! # Connector and Source Create/Replace Service
//!
//! Backs `PUT /connectors/{connector_id}` and
//! `PUT /connectors/{connector_id}/sources`. Both routes stay registered in
//! every deployment but only run when the `create` capability is on.
//!
//! ## Workflow
//!
//! 1.  **Capability Check**: `Capabilities::require_create` answers
//!     `403 Forbidden` before the body or the store are looked at.
//!
//! 2.  **Body Parsing**: the connector body is optional. An empty body means
//!     "no attributes"; any other body must be a well-formed `ConnectorBody`,
//!     otherwise the request fails with `422` and nothing is written. The
//!     source body is always required.
//!
//! 3.  **Validation**: `months_to_fetch` bounds and the `last_update` shape
//!     are checked by the `registry::validation` functions.
//!
//! 4.  **Upsert**: under the store's write lock, `put_connector` or
//!     `put_source` inserts the record or replaces the existing one.
//!
//! 5.  **HTTP Response**: `201 Created` for a new record, `200 OK` for a
//!     replacement, both carrying the connector's aggregate.

use crate::config::Capabilities;
use crate::error::ApiError;
use crate::registry::lifecycle::{put_connector, put_source, Upsert};
use crate::registry::validation::{parse_connector_id, validate_connector_body, validate_source_body};
use crate::store::RecordStore;
use actix_web::{web, HttpResponse};
use common::model::aggregate::ConnectorAndSources;
use common::requests::{ConnectorBody, SourceBody};
use log::info;

fn respond(aggregate: ConnectorAndSources, outcome: Upsert) -> HttpResponse {
    match outcome {
        Upsert::Created => HttpResponse::Created().json(aggregate),
        Upsert::Replaced => HttpResponse::Ok().json(aggregate),
    }
}

/// Reads an optional connector body. Only a blank body stands for "no body".
fn parse_connector_body(raw: &[u8]) -> Result<ConnectorBody, ApiError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(ConnectorBody::default());
    }
    serde_json::from_slice(raw)
        .map_err(|e| ApiError::Validation(format!("Invalid connector body: {}", e)))
}

/// Actix web handler for `PUT /connectors/{connector_id}`.
///
/// # Arguments
/// * `capabilities` - The deployment's capability table.
/// * `connector_id` - The connector UUID, extracted from the URL path.
/// * `payload` - The raw request body; may be empty.
///
/// # Returns
/// - `201 Created` or `200 OK` with the connector's aggregate.
/// - `403 Forbidden` while creation is disabled.
/// - `422 Unprocessable Entity` for a malformed id or body.
pub(crate) async fn connector(
    store: web::Data<RecordStore>,
    capabilities: web::Data<Capabilities>,
    connector_id: web::Path<String>,
    payload: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    capabilities.require_create()?;
    let id = parse_connector_id(&connector_id)?;
    let body = parse_connector_body(&payload)?;
    let record = validate_connector_body(id, &body)?;

    let mut collections = store.write().await;
    let (aggregate, outcome) = put_connector(&mut collections, record)?;
    info!("Connector {} {:?}", id, outcome);
    Ok(respond(aggregate, outcome))
}

/// Actix web handler for `PUT /connectors/{connector_id}/sources`.
///
/// The connector must already exist; the source is keyed by its `type`.
pub(crate) async fn source(
    store: web::Data<RecordStore>,
    capabilities: web::Data<Capabilities>,
    connector_id: web::Path<String>,
    payload: web::Json<SourceBody>,
) -> Result<HttpResponse, ApiError> {
    capabilities.require_create()?;
    let id = parse_connector_id(&connector_id)?;
    let record = validate_source_body(id, &payload)?;
    let source_type = record.source_type;

    let mut collections = store.write().await;
    let (aggregate, outcome) = put_source(&mut collections, record)?;
    info!("Connector {}: source '{}' {:?}", id, source_type, outcome);
    Ok(respond(aggregate, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_body_means_no_attributes() {
        for raw in [&b""[..], &b"  \n"[..]] {
            let body = parse_connector_body(raw).unwrap();
            assert_eq!(body.hidden, None);
            assert_eq!(body.months_to_fetch, None);
        }
    }

    #[test]
    fn malformed_body_is_never_treated_as_empty() {
        for raw in [
            &br#"{"hidden": "yes", "months_to_fetch": 6}"#[..],
            &b"{\"hidden\": tru"[..],
            &br#"{"hiden": true}"#[..],
            &b"null"[..],
        ] {
            assert!(matches!(
                parse_connector_body(raw),
                Err(ApiError::Validation(_))
            ));
        }
    }
}
