//! # Connectors Service Module
//!
//! Routes every request under `/connectors` to its handler. Handlers parse
//! and validate the request, take the store lock, call into `registry`, and
//! serialize the result; all failures go out through `ApiError`.
//!
//! ## Registered Routes:
//!
//! *   **`GET /`**: paginated list of connectors with their sources.
//! *   **`PATCH /`**: bulk availability update across connectors.
//! *   **`PATCH /settings`**: connector-level attribute update. Registered
//!     before the `{connector_id}` routes so that `settings` is not taken
//!     for an id.
//! *   **`GET /{connector_id}`**: one connector with its sources.
//! *   **`PATCH /{connector_id}`**: availability update for one connector.
//! *   **`PUT /{connector_id}`**, **`PUT /{connector_id}/sources`**:
//!     create or replace, gated by the `create` capability.
//! *   **`DELETE /{connector_id}`**, **`DELETE /{connector_id}/sources/{type}`**:
//!     gated by the `delete` capability.
//! *   **`GET /{connector_id}/sources`**: flat source listing.

mod bulk_update;
mod get;
mod list;
mod remove;
mod replace;
mod settings;
mod sources;
mod update;

use actix_web::web::{delete, get, patch, put, scope};
use actix_web::Scope;

/// The base path for all connector routes.
const API_PATH: &str = "/connectors";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", patch().to(bulk_update::process))
        .route("/settings", patch().to(settings::process))
        .route("/{connector_id}", get().to(get::process))
        .route("/{connector_id}", patch().to(update::process))
        .route("/{connector_id}", put().to(replace::connector))
        .route("/{connector_id}", delete().to(remove::connector))
        .route("/{connector_id}/sources", get().to(sources::process))
        .route("/{connector_id}/sources", put().to(replace::source))
        .route(
            "/{connector_id}/sources/{source_type}",
            delete().to(remove::source),
        )
}
