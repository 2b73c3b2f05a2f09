mod config;
mod error;
mod registry;
mod services;
mod store;

use crate::config::AppConfig;
use crate::store::{fixtures, RecordStore};
use actix_web::{App, HttpServer};
use env_logger::Env;
use log::info;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = AppConfig::from_env();

    let collections = fixtures::load(config.fixtures_dir.as_deref())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    let store = RecordStore::new(collections);

    let capabilities = config.capabilities;
    let json_limit = config.json_limit;
    info!(
        "Capabilities: create={}, delete={}",
        capabilities.create, capabilities.delete
    );
    info!("Server running at {}", config.bind_url());

    HttpServer::new(move || {
        App::new().configure(services::configure_app(
            store.clone(),
            capabilities,
            json_limit,
        ))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
