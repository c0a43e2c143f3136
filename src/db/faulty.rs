//! Test store that fails deletes of one table.

use async_trait::async_trait;

use super::{MemoryStore, Store, StoreError, StoreTx, Table};
use crate::models::{
    Assignment, Department, Employee, NewDepartment, NewEmployee, NewProject, NewSalary, Project,
    Salary,
};

/// Wraps a [`MemoryStore`]; every transaction refuses `delete_all(fail_on)`.
pub struct FaultyStore {
    pub inner: MemoryStore,
    pub fail_on: Table,
}

#[async_trait]
impl Store for FaultyStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError> {
        Ok(Box::new(FaultyTx {
            inner: self.inner.begin().await?,
            fail_on: self.fail_on,
        }))
    }
}

struct FaultyTx {
    inner: Box<dyn StoreTx>,
    fail_on: Table,
}

#[async_trait]
impl StoreTx for FaultyTx {
    async fn delete_all(&mut self, table: Table) -> Result<u64, StoreError> {
        if table == self.fail_on {
            return Err(StoreError::Constraint(format!("delete on {table} refused")));
        }
        self.inner.delete_all(table).await
    }

    async fn insert_department(&mut self, new: &NewDepartment) -> Result<Department, StoreError> {
        self.inner.insert_department(new).await
    }

    async fn insert_employee(&mut self, new: &NewEmployee) -> Result<Employee, StoreError> {
        self.inner.insert_employee(new).await
    }

    async fn insert_project(&mut self, new: &NewProject) -> Result<Project, StoreError> {
        self.inner.insert_project(new).await
    }

    async fn insert_salary(&mut self, new: &NewSalary) -> Result<Salary, StoreError> {
        self.inner.insert_salary(new).await
    }

    async fn insert_assignment(&mut self, new: &Assignment) -> Result<Assignment, StoreError> {
        self.inner.insert_assignment(new).await
    }

    async fn list_departments(&mut self) -> Result<Vec<Department>, StoreError> {
        self.inner.list_departments().await
    }

    async fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError> {
        self.inner.list_employees().await
    }

    async fn list_projects(&mut self) -> Result<Vec<Project>, StoreError> {
        self.inner.list_projects().await
    }

    async fn list_salaries(&mut self) -> Result<Vec<Salary>, StoreError> {
        self.inner.list_salaries().await
    }

    async fn list_assignments(&mut self) -> Result<Vec<Assignment>, StoreError> {
        self.inner.list_assignments().await
    }

    async fn get_department(&mut self, id: i32) -> Result<Option<Department>, StoreError> {
        self.inner.get_department(id).await
    }

    async fn get_employee(&mut self, id: i32) -> Result<Option<Employee>, StoreError> {
        self.inner.get_employee(id).await
    }

    async fn projects_for_employee(&mut self, employee_id: i32) -> Result<Vec<Project>, StoreError> {
        self.inner.projects_for_employee(employee_id).await
    }

    async fn salaries_for_employee(&mut self, employee_id: i32) -> Result<Vec<Salary>, StoreError> {
        self.inner.salaries_for_employee(employee_id).await
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.inner.commit().await
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        self.inner.rollback().await
    }
}
