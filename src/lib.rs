pub mod analytics;
pub mod config;
pub mod db;
pub mod errors;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod utils;

use actix_cors::Cors;
use actix_web::web;
use std::sync::Arc;

use db::Store;
use errors::AppError;
use generator::MockDataGenerator;

/// Shared by every worker.
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub generator: MockDataGenerator,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, default_seed: Option<u64>) -> Self {
        AppState {
            generator: MockDataGenerator::new(store.clone(), default_seed),
            store,
        }
    }
}

/// Any origin, method and header; browser dashboards call the API directly.
pub fn cors() -> Cors {
    Cors::permissive()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(web::resource("/").route(web::get().to(handlers::index)))
    .service(
        web::resource("/departments")
            .route(web::post().to(handlers::department::create_department))
            .route(web::get().to(handlers::department::get_departments)),
    )
    .service(
        web::resource("/employees")
            .route(web::post().to(handlers::employee::create_employee))
            .route(web::get().to(handlers::employee::get_employees)),
    )
    .service(
        web::resource("/employees/{employee_id}")
            .route(web::get().to(handlers::employee::get_employee_with_relations)),
    )
    .service(
        web::resource("/projects")
            .route(web::post().to(handlers::project::create_project))
            .route(web::get().to(handlers::project::get_projects)),
    )
    .service(
        web::resource("/salaries")
            .route(web::post().to(handlers::salary::create_salary))
            .route(web::get().to(handlers::salary::get_salaries)),
    )
    .service(
        web::resource("/generate/mock_data")
            .route(web::post().to(handlers::generate::generate_mock_data))
            .route(web::delete().to(handlers::generate::reset_mock_data)),
    )
    .service(
        web::resource("/analytics/summary")
            .route(web::get().to(handlers::analytics::get_summary)),
    );
}
