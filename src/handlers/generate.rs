use actix_web::{web, HttpResponse};
use chrono::Utc;
use log::info;
use serde_json::json;

use crate::errors::AppError;
use crate::generator::GenerationRequest;
use crate::AppState;

pub async fn generate_mock_data(
    state: web::Data<AppState>,
    query: web::Query<GenerationRequest>,
) -> Result<HttpResponse, AppError> {
    let request = query.into_inner();
    let stats = state
        .generator
        .generate(&request, Utc::now().date_naive())
        .await?;

    info!(
        "Generated {} departments, {} employees, {} projects, {} salaries",
        stats.departments, stats.employees, stats.projects, stats.salaries
    );
    Ok(HttpResponse::Ok().json(json!({
        "message": "Mock data generated successfully",
        "stats": stats,
    })))
}

pub async fn reset_mock_data(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let removed = state.generator.reset().await?;

    info!("Cleared {} rows", removed);
    Ok(HttpResponse::Ok().json(json!({
        "message": "All data cleared",
        "removed": removed,
    })))
}
