use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use log::info;
use serde::Deserialize;
use validator::Validate;

use crate::errors::AppError;
use crate::models::{DepartmentName, NewDepartment};
use crate::utils::validation::{validate_payload, validate_positive};
use crate::AppState;

#[derive(Deserialize, Validate)]
pub struct DepartmentPayload {
    name: DepartmentName,
    #[validate(length(min = 1, max = 100))]
    location: String,
    #[validate(custom = "validate_positive")]
    budget: f64,
    #[validate(length(min = 1, max = 50))]
    head_of_department: String,
    established_date: NaiveDate,
    #[serde(default)]
    #[validate(range(min = 0))]
    employee_count: i32,
}

impl From<DepartmentPayload> for NewDepartment {
    fn from(payload: DepartmentPayload) -> Self {
        NewDepartment {
            name: payload.name.to_string(),
            location: payload.location,
            budget: payload.budget,
            head_of_department: payload.head_of_department,
            established_date: payload.established_date,
            employee_count: payload.employee_count,
        }
    }
}

pub async fn create_department(
    state: web::Data<AppState>,
    payload: web::Json<DepartmentPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let new_department = NewDepartment::from(payload.into_inner());

    let mut tx = state.store.begin().await?;
    let department = tx.insert_department(&new_department).await?;
    tx.commit().await?;

    info!("Created department {} ({})", department.id, department.name);
    Ok(HttpResponse::Created().json(department))
}

pub async fn get_departments(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let mut tx = state.store.begin().await?;
    let departments = tx.list_departments().await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(departments))
}
