use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info, warn};
use std::io;
use std::sync::Arc;

use staffgen::config::AppConfig;
use staffgen::db::{self, schema, MemoryStore, PgStore, Store};
use staffgen::{configure, cors, AppState};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().map_err(|err| {
        error!("Invalid configuration: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(database_url) => {
            let pool = db::create_pool(database_url, config.max_connections)
                .await
                .map_err(|err| {
                    error!("Failed to connect to the database: {}", err);
                    io::Error::new(io::ErrorKind::ConnectionRefused, err)
                })?;
            schema::ensure_schema(&pool)
                .await
                .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
            Arc::new(PgStore::new(pool))
        }
        None => {
            warn!("Running against the in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let state = web::Data::new(AppState::new(store, config.mock_data_seed));

    info!("Starting server at {}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
