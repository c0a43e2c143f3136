use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use log::info;
use serde::Deserialize;
use validator::Validate;

use crate::errors::AppError;
use crate::models::{EmployeeWithRelations, NewEmployee};
use crate::utils::validation::{validate_not_future, validate_payload, PHONE_RE};
use crate::AppState;

#[derive(Deserialize, Validate)]
pub struct EmployeePayload {
    #[validate(length(min = 2, max = 50))]
    first_name: String,
    #[validate(length(min = 2, max = 50))]
    last_name: String,
    #[validate(email, length(max = 50))]
    email: String,
    #[validate(regex = "PHONE_RE")]
    phone: String,
    #[validate(custom = "validate_not_future")]
    hire_date: NaiveDate,
    #[validate(length(min = 1, max = 50))]
    job_title: String,
    department_id: Option<i32>,
}

impl From<EmployeePayload> for NewEmployee {
    fn from(payload: EmployeePayload) -> Self {
        NewEmployee {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            hire_date: payload.hire_date,
            job_title: payload.job_title,
            department_id: payload.department_id,
        }
    }
}

pub async fn create_employee(
    state: web::Data<AppState>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let new_employee = NewEmployee::from(payload.into_inner());

    let mut tx = state.store.begin().await?;
    let employee = tx.insert_employee(&new_employee).await?;
    tx.commit().await?;

    info!("Created employee {} <{}>", employee.id, employee.email);
    Ok(HttpResponse::Created().json(employee))
}

pub async fn get_employees(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let mut tx = state.store.begin().await?;
    let employees = tx.list_employees().await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(employees))
}

pub async fn get_employee_with_relations(
    state: web::Data<AppState>,
    employee_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let employee_id = employee_id.into_inner();

    let mut tx = state.store.begin().await?;
    let employee = tx
        .get_employee(employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;
    let department = match employee.department_id {
        Some(department_id) => tx.get_department(department_id).await?,
        None => None,
    };
    let projects = tx.projects_for_employee(employee_id).await?;
    let salaries = tx.salaries_for_employee(employee_id).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(EmployeeWithRelations {
        employee,
        department,
        projects,
        salaries,
    }))
}
