use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::department::Department;
use super::project::Project;
use super::salary::Salary;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub hire_date: NaiveDate,
    pub job_title: String,
    pub department_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub hire_date: NaiveDate,
    pub job_title: String,
    pub department_id: Option<i32>,
}

/// An employee together with everything that hangs off it.
#[derive(Serialize, Debug)]
pub struct EmployeeWithRelations {
    #[serde(flatten)]
    pub employee: Employee,
    pub department: Option<Department>,
    pub projects: Vec<Project>,
    pub salaries: Vec<Salary>,
}
