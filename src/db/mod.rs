#[cfg(test)]
pub(crate) mod faulty;
pub mod memory;
pub mod postgres;
pub mod schema;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::fmt;
use thiserror::Error;

use crate::models::{
    Assignment, Department, Employee, NewDepartment, NewEmployee, NewProject, NewSalary, Project,
    Salary,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Departments,
    Employees,
    Projects,
    Salaries,
    Assignments,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Departments => "departments",
            Table::Employees => "employees",
            Table::Projects => "projects",
            Table::Salaries => "salaries",
            Table::Assignments => "project_employees",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// FK, uniqueness or check constraint rejected the write.
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return StoreError::Constraint(db_err.message().to_string());
                }
                _ => {}
            }
        }
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound("row not found".to_string()),
            other => StoreError::Database(other),
        }
    }
}

/// A handle that hands out transactions.
#[async_trait]
pub trait Store: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError>;
}

/// One open transaction. Dropping it without [`StoreTx::commit`] discards
/// every write made through it.
#[async_trait]
pub trait StoreTx: Send {
    /// Removes every row of `table`, returning the number removed.
    async fn delete_all(&mut self, table: Table) -> Result<u64, StoreError>;

    async fn insert_department(&mut self, new: &NewDepartment) -> Result<Department, StoreError>;
    async fn insert_employee(&mut self, new: &NewEmployee) -> Result<Employee, StoreError>;
    async fn insert_project(&mut self, new: &NewProject) -> Result<Project, StoreError>;
    async fn insert_salary(&mut self, new: &NewSalary) -> Result<Salary, StoreError>;
    async fn insert_assignment(&mut self, new: &Assignment) -> Result<Assignment, StoreError>;

    async fn list_departments(&mut self) -> Result<Vec<Department>, StoreError>;
    async fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError>;
    async fn list_projects(&mut self) -> Result<Vec<Project>, StoreError>;
    async fn list_salaries(&mut self) -> Result<Vec<Salary>, StoreError>;
    async fn list_assignments(&mut self) -> Result<Vec<Assignment>, StoreError>;

    async fn get_department(&mut self, id: i32) -> Result<Option<Department>, StoreError>;
    async fn get_employee(&mut self, id: i32) -> Result<Option<Employee>, StoreError>;
    async fn projects_for_employee(&mut self, employee_id: i32) -> Result<Vec<Project>, StoreError>;
    async fn salaries_for_employee(&mut self, employee_id: i32) -> Result<Vec<Salary>, StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
    async fn rollback(self: Box<Self>) -> Result<(), StoreError>;
}
