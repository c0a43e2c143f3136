use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::analytics::summarize;
use crate::errors::AppError;
use crate::AppState;

pub async fn get_summary(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let mut tx = state.store.begin().await?;
    let departments = tx.list_departments().await?;
    let employees = tx.list_employees().await?;
    let projects = tx.list_projects().await?;
    let salaries = tx.list_salaries().await?;
    tx.commit().await?;

    let summary = summarize(
        &departments,
        &employees,
        &projects,
        &salaries,
        Utc::now().date_naive(),
    );
    Ok(HttpResponse::Ok().json(summary))
}
