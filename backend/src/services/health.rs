use crate::store::RecordStore;
use actix_web::web::{get, resource};
use actix_web::{web, HttpResponse, Resource};

pub fn configure_routes() -> Resource {
    resource("/health").route(get().to(process))
}

/// Liveness check, with the current record counts.
async fn process(store: web::Data<RecordStore>) -> HttpResponse {
    let collections = store.read().await;
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "connectors": collections.list_connectors().len(),
        "sources": collections.list_sources().len(),
    }))
}
