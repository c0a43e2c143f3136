use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use log::info;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::errors::AppError;
use crate::models::{NewProject, ProjectStatus};
use crate::utils::validation::{validate_payload, validate_positive};
use crate::AppState;

#[derive(Deserialize, Validate)]
#[validate(schema(function = "validate_project_dates"))]
pub struct ProjectPayload {
    #[validate(length(min = 1, max = 100))]
    name: String,
    #[validate(length(max = 500))]
    description: Option<String>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    #[validate(custom = "validate_positive")]
    budget: f64,
    #[serde(default)]
    status: ProjectStatus,
    department_id: i32,
}

fn validate_project_dates(payload: &ProjectPayload) -> Result<(), ValidationError> {
    match payload.end_date {
        Some(end_date) if end_date < payload.start_date => {
            Err(ValidationError::new("end date must be after start date"))
        }
        _ => Ok(()),
    }
}

impl From<ProjectPayload> for NewProject {
    fn from(payload: ProjectPayload) -> Self {
        NewProject {
            name: payload.name,
            description: payload.description,
            start_date: payload.start_date,
            end_date: payload.end_date,
            budget: payload.budget,
            status: payload.status,
            department_id: payload.department_id,
        }
    }
}

pub async fn create_project(
    state: web::Data<AppState>,
    payload: web::Json<ProjectPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let new_project = NewProject::from(payload.into_inner());

    let mut tx = state.store.begin().await?;
    let project = tx.insert_project(&new_project).await?;
    tx.commit().await?;

    info!("Created project {} ({})", project.id, project.name);
    Ok(HttpResponse::Created().json(project))
}

pub async fn get_projects(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let mut tx = state.store.begin().await?;
    let projects = tx.list_projects().await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(projects))
}
