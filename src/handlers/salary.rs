use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::errors::AppError;
use crate::models::{NewSalary, PaymentMethod};
use crate::utils::validation::{validate_payload, validate_positive};
use crate::AppState;

#[derive(Deserialize, Validate)]
pub struct SalaryPayload {
    employee_id: i32,
    #[validate(custom = "validate_positive")]
    amount: f64,
    payment_date: NaiveDate,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    tax_deduction: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    bonus: f64,
    payment_method: PaymentMethod,
}

pub async fn create_salary(
    state: web::Data<AppState>,
    payload: web::Json<SalaryPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let payload = payload.into_inner();
    let new_salary = NewSalary {
        employee_id: payload.employee_id,
        amount: payload.amount,
        payment_date: payload.payment_date,
        tax_deduction: payload.tax_deduction,
        bonus: payload.bonus,
        payment_method: payload.payment_method,
    };

    let mut tx = state.store.begin().await?;
    let salary = tx.insert_salary(&new_salary).await?;
    tx.commit().await?;

    Ok(HttpResponse::Created().json(salary))
}

pub async fn get_salaries(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let mut tx = state.store.begin().await?;
    let salaries = tx.list_salaries().await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(salaries))
}
