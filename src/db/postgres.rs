use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::{Store, StoreError, StoreTx, Table};
use crate::models::{
    Assignment, Department, Employee, NewDepartment, NewEmployee, NewProject, NewSalary, Project,
    Salary,
};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgTx { tx }))
    }
}

pub struct PgTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTx for PgTx {
    async fn delete_all(&mut self, table: Table) -> Result<u64, StoreError> {
        // table names come from a closed enum, never from input
        let result = sqlx::query(&format!("DELETE FROM {}", table.name()))
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_department(&mut self, new: &NewDepartment) -> Result<Department, StoreError> {
        let department = sqlx::query_as::<_, Department>(
            "INSERT INTO departments (name, location, budget, head_of_department, established_date, employee_count) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&new.name)
        .bind(&new.location)
        .bind(new.budget)
        .bind(&new.head_of_department)
        .bind(new.established_date)
        .bind(new.employee_count)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(department)
    }

    async fn insert_employee(&mut self, new: &NewEmployee) -> Result<Employee, StoreError> {
        let employee = sqlx::query_as::<_, Employee>(
            "INSERT INTO employees (first_name, last_name, email, phone, hire_date, job_title, department_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(new.hire_date)
        .bind(&new.job_title)
        .bind(new.department_id)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(employee)
    }

    async fn insert_project(&mut self, new: &NewProject) -> Result<Project, StoreError> {
        let project = sqlx::query_as::<_, Project>(
            "INSERT INTO projects (name, description, start_date, end_date, budget, status, department_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.budget)
        .bind(new.status.as_str())
        .bind(new.department_id)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(project)
    }

    async fn insert_salary(&mut self, new: &NewSalary) -> Result<Salary, StoreError> {
        let salary = sqlx::query_as::<_, Salary>(
            "INSERT INTO salaries (employee_id, amount, payment_date, tax_deduction, bonus, payment_method) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(new.employee_id)
        .bind(new.amount)
        .bind(new.payment_date)
        .bind(new.tax_deduction)
        .bind(new.bonus)
        .bind(new.payment_method.as_str())
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(salary)
    }

    async fn insert_assignment(&mut self, new: &Assignment) -> Result<Assignment, StoreError> {
        let assignment = sqlx::query_as::<_, Assignment>(
            "INSERT INTO project_employees (employee_id, project_id, role, join_date) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(new.employee_id)
        .bind(new.project_id)
        .bind(&new.role)
        .bind(new.join_date)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(assignment)
    }

    async fn list_departments(&mut self) -> Result<Vec<Department>, StoreError> {
        let rows = sqlx::query_as::<_, Department>("SELECT * FROM departments ORDER BY id")
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn list_employees(&mut self) -> Result<Vec<Employee>, StoreError> {
        let rows = sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY id")
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn list_projects(&mut self) -> Result<Vec<Project>, StoreError> {
        let rows = sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY id")
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn list_salaries(&mut self) -> Result<Vec<Salary>, StoreError> {
        let rows = sqlx::query_as::<_, Salary>("SELECT * FROM salaries ORDER BY id")
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn list_assignments(&mut self) -> Result<Vec<Assignment>, StoreError> {
        let rows = sqlx::query_as::<_, Assignment>(
            "SELECT * FROM project_employees ORDER BY project_id, employee_id",
        )
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    async fn get_department(&mut self, id: i32) -> Result<Option<Department>, StoreError> {
        let row = sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn get_employee(&mut self, id: i32) -> Result<Option<Employee>, StoreError> {
        let row = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn projects_for_employee(&mut self, employee_id: i32) -> Result<Vec<Project>, StoreError> {
        let rows = sqlx::query_as::<_, Project>(
            "SELECT p.* FROM projects p \
             JOIN project_employees pe ON pe.project_id = p.id \
             WHERE pe.employee_id = $1 ORDER BY p.id",
        )
        .bind(employee_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    async fn salaries_for_employee(&mut self, employee_id: i32) -> Result<Vec<Salary>, StoreError> {
        let rows = sqlx::query_as::<_, Salary>(
            "SELECT * FROM salaries WHERE employee_id = $1 ORDER BY payment_date, id",
        )
        .bind(employee_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
