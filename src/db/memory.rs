//! In-process store with the same constraints as the Postgres schema.
//!
//! A transaction holds the table lock for its whole lifetime and works on a
//! private copy of the tables, so transactions are fully serialized and a
//! dropped transaction leaves no trace.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{Store, StoreError, StoreTx, Table};
use crate::models::{
    Assignment, Department, Employee, NewDepartment, NewEmployee, NewProject, NewSalary, Project,
    Salary,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    departments: Vec<Department>,
    employees: Vec<Employee>,
    projects: Vec<Project>,
    salaries: Vec<Salary>,
    assignments: Vec<Assignment>,
    // serial counters, part of the snapshot so a rollback restores them
    next_department_id: i32,
    next_employee_id: i32,
    next_project_id: i32,
    next_salary_id: i32,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

fn violation(message: impl Into<String>) -> StoreError {
    StoreError::Constraint(message.into())
}

impl Tables {
    fn department_exists(&self, id: i32) -> bool {
        self.departments.iter().any(|d| d.id == id)
    }

    fn employee_exists(&self, id: i32) -> bool {
        self.employees.iter().any(|e| e.id == id)
    }

    fn project_exists(&self, id: i32) -> bool {
        self.projects.iter().any(|p| p.id == id)
    }

    /// Rows that would be left dangling if `table` were emptied.
    fn referencing_rows(&self, table: Table) -> Option<Table> {
        match table {
            Table::Departments => {
                if self.employees.iter().any(|e| e.department_id.is_some()) {
                    Some(Table::Employees)
                } else if !self.projects.is_empty() {
                    Some(Table::Projects)
                } else {
                    None
                }
            }
            Table::Employees => {
                if !self.salaries.is_empty() {
                    Some(Table::Salaries)
                } else if !self.assignments.is_empty() {
                    Some(Table::Assignments)
                } else {
                    None
                }
            }
            Table::Projects => (!self.assignments.is_empty()).then_some(Table::Assignments),
            Table::Salaries | Table::Assignments => None,
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError> {
        let guard = self.tables.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTx { guard, working }))
    }
}

pub struct MemoryTx {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn delete_all(&mut self, table: Table) -> Result<u64, StoreError> {
        if let Some(child) = self.working.referencing_rows(table) {
            return Err(violation(format!(
                "delete on table \"{table}\" violates foreign key constraint on table \"{child}\""
            )));
        }
        let tables = &mut self.working;
        let removed = match table {
            Table::Departments => std::mem::take(&mut tables.departments).len(),
            Table::Employees => std::mem::take(&mut tables.employees).len(),
            Table::Projects => std::mem::take(&mut tables.projects).len(),
            Table::Salaries => std::mem::take(&mut tables.salaries).len(),
            Table::Assignments => std::mem::take(&mut tables.assignments).len(),
        };
        Ok(removed as u64)
    }

    async fn insert_department(&mut self, new: &NewDepartment) -> Result<Department, StoreError> {
        let tables = &mut self.working;
        if tables.departments.iter().any(|d| d.name == new.name) {
            return Err(violation(format!(
                "duplicate key value violates unique constraint \"departments_name_key\": name={}",
                new.name
            )));
        }
        if new.budget <= 0.0 {
            return Err(violation("check constraint on departments.budget"));
        }
        if new.employee_count < 0 {
            return Err(violation("check constraint on departments.employee_count"));
        }
        let department = Department {
            id: next_id(&mut tables.next_department_id),
            name: new.name.clone(),
            location: new.location.clone(),
            budget: new.budget,
            head_of_department: new.head_of_department.clone(),
            established_date: new.established_date,
            employee_count: new.employee_count,
        };
        tables.departments.push(department.clone());
        Ok(department)
    }

    async fn insert_employee(&mut self, new: &NewEmployee) -> Result<Employee, StoreError> {
        let tables = &mut self.working;
        if tables.employees.iter().any(|e| e.email == new.email) {
            return Err(violation(format!(
                "duplicate key value violates unique constraint \"employees_email_key\": email={}",
                new.email
            )));
        }
        if let Some(department_id) = new.department_id {
            if !tables.department_exists(department_id) {
                return Err(violation(format!(
                    "insert on table \"employees\" violates foreign key: department {department_id} does not exist"
                )));
            }
        }
        let employee = Employee {
            id: next_id(&mut tables.next_employee_id),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            hire_date: new.hire_date,
            job_title: new.job_title.clone(),
            department_id: new.department_id,
        };
        tables.employees.push(employee.clone());
        Ok(employee)
    }

    async fn insert_project(&mut self, new: &NewProject) -> Result<Project, StoreError> {
        let tables = &mut self.working;
        if !tables.department_exists(new.department_id) {
            return Err(violation(format!(
                "insert on table \"projects\" violates foreign key: department {} does not exist",
                new.department_id
            )));
        }
        if new.budget <= 0.0 {
            return Err(violation("check constraint on projects.budget"));
        }
        let project = Project {
            id: next_id(&mut tables.next_project_id),
            name: new.name.clone(),
            description: new.description.clone(),
            start_date: new.start_date,
            end_date: new.end_date,
            budget: new.budget,
            status: new.status,
            department_id: new.department_id,
        };
        tables.projects.push(project.clone());
        Ok(project)
    }

    async fn insert_salary(&mut self, new: &NewSalary) -> Result<Salary, StoreError> {
        let tables = &mut self.working;
        if !tables.employee_exists(new.employee_id) {
            return Err(violation(format!(
                "insert on table \"salaries\" violates foreign key: employee {} does not exist",
                new.employee_id
            )));
        }
        if new.amount <= 0.0 || new.tax_deduction < 0.0 || new.bonus < 0.0 {
            return Err(violation("check constraint on salaries amounts"));
        }
        let salary = Salary {
            id: next_id(&mut tables.next_salary_id),
            employee_id: new.employee_id,
            amount: new.amount,
            payment_date: new.payment_date,
            tax_deduction: new.tax_deduction,
            bonus: new.bonus,
            payment_method: new.payment_method,
        };
        tables.salaries.push(salary.clone());
        Ok(salary)
    }

    async fn insert_assignment(&mut self, new: &Assignment) -> Result<Assignment, StoreError> {
        let tables = &mut self.working;
        if !tables.employee_exists(new.employee_id) || !tables.project_exists(new.project_id) {
            return Err(violation(format!(
                "insert on table \"project_employees\" violates foreign key: employee {} / project {}",
                new.employee_id, new.project_id
            )));
        }
        if tables
            .assignments
            .iter()
            .any(|a| a.employee_id == new.employee_id && a.project_id == new.project_id)
        {
            return Err(violation(format!(
                "duplicate key value violates unique constraint \"project_employees_pkey\": ({}, {})",
                new.employee_id, new.project_id
            )));
        }
        tables.assignments.push(new.clone());
        Ok(new.clone())
    }

    async fn list_departments(&mut self) -> Result<Vec<Department>, StoreError> {
        Ok(self.working.departments.clone())
    }

    async fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.working.employees.clone())
    }

    async fn list_projects(&mut self) -> Result<Vec<Project>, StoreError> {
        Ok(self.working.projects.clone())
    }

    async fn list_salaries(&mut self) -> Result<Vec<Salary>, StoreError> {
        Ok(self.working.salaries.clone())
    }

    async fn list_assignments(&mut self) -> Result<Vec<Assignment>, StoreError> {
        let mut rows = self.working.assignments.clone();
        rows.sort_by_key(|a| (a.project_id, a.employee_id));
        Ok(rows)
    }

    async fn get_department(&mut self, id: i32) -> Result<Option<Department>, StoreError> {
        Ok(self.working.departments.iter().find(|d| d.id == id).cloned())
    }

    async fn get_employee(&mut self, id: i32) -> Result<Option<Employee>, StoreError> {
        Ok(self.working.employees.iter().find(|e| e.id == id).cloned())
    }

    async fn projects_for_employee(&mut self, employee_id: i32) -> Result<Vec<Project>, StoreError> {
        let tables = &self.working;
        Ok(tables
            .projects
            .iter()
            .filter(|p| {
                tables
                    .assignments
                    .iter()
                    .any(|a| a.employee_id == employee_id && a.project_id == p.id)
            })
            .cloned()
            .collect())
    }

    async fn salaries_for_employee(&mut self, employee_id: i32) -> Result<Vec<Salary>, StoreError> {
        let mut rows: Vec<Salary> = self
            .working
            .salaries
            .iter()
            .filter(|s| s.employee_id == employee_id)
            .cloned()
            .collect();
        rows.sort_by_key(|s| (s.payment_date, s.id));
        Ok(rows)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemoryTx { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        Ok(())
    }
}
