use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Links an employee to a project. Keyed by `(employee_id, project_id)`.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Assignment {
    pub employee_id: i32,
    pub project_id: i32,
    pub role: String,
    pub join_date: NaiveDate,
}
