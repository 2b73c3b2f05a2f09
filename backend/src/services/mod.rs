//! HTTP surface of the service.
//!
//! `configure_app` wires the shared state, the extractor configuration and
//! every route scope into an Actix `App`. It is used by `main.rs` for each
//! worker and by the route tests.

pub mod connectors;
mod health;

use crate::config::Capabilities;
use crate::error::ApiError;
use crate::store::RecordStore;
use actix_web::web;

/// Registers state, extractor settings and routes.
pub fn configure_app(
    store: RecordStore,
    capabilities: Capabilities,
    json_limit: usize,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(json_config(json_limit))
            .app_data(query_config())
            .app_data(web::Data::new(store))
            .app_data(web::Data::new(capabilities))
            .service(health::configure_routes())
            .service(connectors::configure_routes());
    }
}

/// Malformed bodies are answered with the same envelope as core errors.
fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}
