use log::info;
use sqlx::PgPool;

const DDL: [&str; 5] = [
    r#"
    CREATE TABLE IF NOT EXISTS departments (
        id SERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL UNIQUE,
        location VARCHAR(100) NOT NULL,
        budget DOUBLE PRECISION NOT NULL CHECK (budget > 0),
        head_of_department VARCHAR(50) NOT NULL,
        established_date DATE NOT NULL,
        employee_count INTEGER NOT NULL DEFAULT 0 CHECK (employee_count >= 0)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id SERIAL PRIMARY KEY,
        first_name VARCHAR(50) NOT NULL,
        last_name VARCHAR(50) NOT NULL,
        email VARCHAR(50) NOT NULL UNIQUE,
        phone VARCHAR(20) NOT NULL,
        hire_date DATE NOT NULL,
        job_title VARCHAR(50) NOT NULL,
        department_id INTEGER REFERENCES departments(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS projects (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        description VARCHAR(500),
        start_date DATE NOT NULL,
        end_date DATE,
        budget DOUBLE PRECISION NOT NULL CHECK (budget > 0),
        status VARCHAR(20) NOT NULL DEFAULT 'Planning',
        department_id INTEGER NOT NULL REFERENCES departments(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS salaries (
        id SERIAL PRIMARY KEY,
        employee_id INTEGER NOT NULL REFERENCES employees(id),
        amount DOUBLE PRECISION NOT NULL CHECK (amount > 0),
        payment_date DATE NOT NULL,
        tax_deduction DOUBLE PRECISION NOT NULL DEFAULT 0 CHECK (tax_deduction >= 0),
        bonus DOUBLE PRECISION NOT NULL DEFAULT 0 CHECK (bonus >= 0),
        payment_method VARCHAR(20) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS project_employees (
        employee_id INTEGER NOT NULL REFERENCES employees(id),
        project_id INTEGER NOT NULL REFERENCES projects(id),
        role VARCHAR(50) NOT NULL,
        join_date DATE NOT NULL,
        PRIMARY KEY (employee_id, project_id)
    )
    "#,
];

/// Creates the tables if they are missing. Existing tables are left alone.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in DDL {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    info!("Database schema ready");
    Ok(())
}
