//! Mock data generation.
//!
//! A request wipes the store and refills it through an ordered list of
//! [`Stage`]s, parents before children. All stages share one transaction:
//! each insert returns the row with its assigned id, which later stages read
//! from the [`Generated`] rows of earlier stages. Any failure rolls the whole
//! request back, wipe included.

pub mod error;
pub mod factory;
pub mod reset;

use chrono::NaiveDate;
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::db::{Store, StoreError, StoreTx};
use crate::models::{Assignment, Department, Employee, Project, Salary};

pub use error::{GenerationError, GenerationFailure, Phase};
use factory::DepartmentNamer;

/// Every project gets at least this many assignees ...
pub const MIN_ASSIGNEES: usize = 2;
/// ... and at most this many.
pub const MAX_ASSIGNEES: usize = 5;

/// Upper bounds on the counts a single request may ask for.
pub const MAX_DEPARTMENTS: usize = 500;
pub const MAX_EMPLOYEES_PER_DEPT: usize = 500;
pub const MAX_PROJECTS_PER_DEPT: usize = 100;
pub const MAX_SALARIES_PER_EMPLOYEE: usize = 60;

/// Row counts for one generation request.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GenerationRequest {
    pub departments: usize,
    pub employees_per_dept: usize,
    pub projects_per_dept: usize,
    pub salaries_per_employee: usize,
    /// Fixes the random source so a request can be replayed.
    pub seed: Option<u64>,
}

impl GenerationRequest {
    /// Rejects counts above the per-request limits before anything is written.
    pub fn check_limits(&self) -> Result<(), GenerationError> {
        let limits = [
            ("departments", self.departments, MAX_DEPARTMENTS),
            ("employees_per_dept", self.employees_per_dept, MAX_EMPLOYEES_PER_DEPT),
            ("projects_per_dept", self.projects_per_dept, MAX_PROJECTS_PER_DEPT),
            (
                "salaries_per_employee",
                self.salaries_per_employee,
                MAX_SALARIES_PER_EMPLOYEE,
            ),
        ];
        for (field, requested, max) in limits {
            if requested > max {
                return Err(GenerationError::CountTooLarge {
                    field,
                    requested,
                    max,
                });
            }
        }
        Ok(())
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        GenerationRequest {
            departments: 3,
            employees_per_dept: 5,
            projects_per_dept: 2,
            salaries_per_employee: 3,
            seed: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    pub departments: usize,
    pub employees: usize,
    pub projects: usize,
    pub salaries: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Reset,
    Departments,
    Employees,
    Projects,
    Assignments,
    Salaries,
}

impl Stage {
    /// Execution order. Each stage only reads rows of stages before it.
    pub const PIPELINE: [Stage; 6] = [
        Stage::Reset,
        Stage::Departments,
        Stage::Employees,
        Stage::Projects,
        Stage::Assignments,
        Stage::Salaries,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Reset => "reset",
            Stage::Departments => "departments",
            Stage::Employees => "employees",
            Stage::Projects => "projects",
            Stage::Assignments => "assignments",
            Stage::Salaries => "salaries",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows created so far in the current request, with their assigned ids.
#[derive(Debug, Default)]
pub struct Generated {
    pub departments: Vec<Department>,
    pub employees: Vec<Employee>,
    pub projects: Vec<Project>,
    pub assignments: Vec<Assignment>,
    pub salaries: Vec<Salary>,
}

impl Generated {
    pub fn stats(&self) -> GenerationStats {
        GenerationStats {
            departments: self.departments.len(),
            employees: self.employees.len(),
            projects: self.projects.len(),
            salaries: self.salaries.len(),
        }
    }
}

/// Serializes every wipe-and-refill against one store.
///
/// Two overlapping requests would interleave their deletes and inserts, so
/// both [`MockDataGenerator::generate`] and [`MockDataGenerator::reset`]
/// hold `write_lock` for their full duration.
pub struct MockDataGenerator {
    store: Arc<dyn Store>,
    write_lock: Mutex<()>,
    default_seed: Option<u64>,
}

impl MockDataGenerator {
    pub fn new(store: Arc<dyn Store>, default_seed: Option<u64>) -> Self {
        MockDataGenerator {
            store,
            write_lock: Mutex::new(()),
            default_seed,
        }
    }

    pub async fn generate(
        &self,
        request: &GenerationRequest,
        today: NaiveDate,
    ) -> Result<GenerationStats, GenerationFailure> {
        let _guard = self.write_lock.lock().await;
        let mut rng = match request.seed.or(self.default_seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        run(self.store.as_ref(), request, &mut rng, today).await
    }

    pub async fn reset(&self) -> Result<u64, StoreError> {
        let _guard = self.write_lock.lock().await;
        reset::reset(self.store.as_ref()).await
    }
}

/// Wipes `store` and fills it according to `request`, atomically.
pub async fn run<R: Rng>(
    store: &dyn Store,
    request: &GenerationRequest,
    rng: &mut R,
    today: NaiveDate,
) -> Result<GenerationStats, GenerationFailure> {
    info!(
        "Generating mock data: {} departments, {} employees/dept, {} projects/dept, {} salaries/employee",
        request.departments,
        request.employees_per_dept,
        request.projects_per_dept,
        request.salaries_per_employee
    );

    request
        .check_limits()
        .map_err(|err| GenerationFailure::new(Phase::Request, err))?;

    let mut tx = store
        .begin()
        .await
        .map_err(|err| GenerationFailure::new(Phase::Begin, err))?;

    let mut generated = Generated::default();
    for stage in Stage::PIPELINE {
        let outcome = run_stage(stage, &mut *tx, rng, request, today, &mut generated).await;
        if let Err(source) = outcome {
            let failure = GenerationFailure::new(Phase::Stage(stage), source);
            error!("{}; rolling back", failure);
            if let Err(rollback_err) = tx.rollback().await {
                error!("Rollback after failed generation also failed: {}", rollback_err);
            }
            return Err(failure);
        }
        debug!("Stage {} done", stage);
    }

    tx.commit()
        .await
        .map_err(|err| GenerationFailure::new(Phase::Commit, err))?;

    let stats = generated.stats();
    info!("Mock data generated: {:?}", stats);
    Ok(stats)
}

async fn run_stage<R: Rng>(
    stage: Stage,
    tx: &mut dyn StoreTx,
    rng: &mut R,
    request: &GenerationRequest,
    today: NaiveDate,
    generated: &mut Generated,
) -> Result<(), GenerationError> {
    match stage {
        Stage::Reset => {
            reset::clear_all(tx).await?;
        }
        Stage::Departments => {
            generated.departments = create_departments(tx, rng, request, today).await?;
        }
        Stage::Employees => {
            generated.employees =
                create_employees(tx, rng, request, today, &generated.departments).await?;
        }
        Stage::Projects => {
            generated.projects =
                create_projects(tx, rng, request, today, &generated.departments).await?;
        }
        Stage::Assignments => {
            generated.assignments =
                create_assignments(tx, rng, &generated.projects, &generated.employees).await?;
        }
        Stage::Salaries => {
            generated.salaries =
                create_salaries(tx, rng, request, today, &generated.employees).await?;
        }
    }
    Ok(())
}

async fn create_departments<R: Rng>(
    tx: &mut dyn StoreTx,
    rng: &mut R,
    request: &GenerationRequest,
    today: NaiveDate,
) -> Result<Vec<Department>, GenerationError> {
    let employee_count = i32::try_from(request.employees_per_dept).unwrap_or(i32::MAX);
    let mut namer = DepartmentNamer::new(rng);
    let mut created = Vec::new();
    for _ in 0..request.departments {
        let (name, strategy) = namer.next_name(rng);
        debug!("Department name {} ({:?})", name, strategy);
        let new = factory::department(rng, name, employee_count, today)?;
        created.push(tx.insert_department(&new).await?);
    }
    Ok(created)
}

async fn create_employees<R: Rng>(
    tx: &mut dyn StoreTx,
    rng: &mut R,
    request: &GenerationRequest,
    today: NaiveDate,
    departments: &[Department],
) -> Result<Vec<Employee>, GenerationError> {
    let mut used_emails = HashSet::new();
    let mut created = Vec::new();
    for department in departments {
        for _ in 0..request.employees_per_dept {
            let new = factory::employee(rng, department, today, &mut used_emails)?;
            created.push(tx.insert_employee(&new).await?);
        }
    }
    Ok(created)
}

async fn create_projects<R: Rng>(
    tx: &mut dyn StoreTx,
    rng: &mut R,
    request: &GenerationRequest,
    today: NaiveDate,
    departments: &[Department],
) -> Result<Vec<Project>, GenerationError> {
    let mut created = Vec::new();
    for department in departments {
        for _ in 0..request.projects_per_dept {
            let new = factory::project(rng, department.id, today)?;
            created.push(tx.insert_project(&new).await?);
        }
    }
    Ok(created)
}

async fn create_assignments<R: Rng>(
    tx: &mut dyn StoreTx,
    rng: &mut R,
    projects: &[Project],
    employees: &[Employee],
) -> Result<Vec<Assignment>, GenerationError> {
    let mut created = Vec::new();
    for project in projects {
        let candidates: Vec<&Employee> = employees
            .iter()
            .filter(|e| e.department_id == Some(project.department_id))
            .collect();
        let assignees = sample_assignees(rng, project, &candidates)?;
        for employee in assignees {
            let assignment = factory::assignment(rng, employee, project)?;
            created.push(tx.insert_assignment(&assignment).await?);
        }
    }
    Ok(created)
}

/// Picks between [`MIN_ASSIGNEES`] and `min(MAX_ASSIGNEES, candidates)`
/// distinct employees. Too few candidates is an error, never a shorter list.
pub fn sample_assignees<'a, R: Rng>(
    rng: &mut R,
    project: &Project,
    candidates: &[&'a Employee],
) -> Result<Vec<&'a Employee>, GenerationError> {
    if candidates.len() < MIN_ASSIGNEES {
        return Err(GenerationError::InsufficientCandidates {
            project_id: project.id,
            department_id: project.department_id,
            available: candidates.len(),
            required: MIN_ASSIGNEES,
        });
    }
    let upper = MAX_ASSIGNEES.min(candidates.len());
    let count = rng.gen_range(MIN_ASSIGNEES..=upper);
    Ok(candidates.choose_multiple(rng, count).copied().collect())
}

async fn create_salaries<R: Rng>(
    tx: &mut dyn StoreTx,
    rng: &mut R,
    request: &GenerationRequest,
    today: NaiveDate,
    employees: &[Employee],
) -> Result<Vec<Salary>, GenerationError> {
    let mut created = Vec::new();
    for employee in employees {
        let base = rng.gen_range(factory::BASE_SALARY);
        for _ in 0..request.salaries_per_employee {
            let new = factory::salary(rng, employee, base, today)?;
            created.push(tx.insert_salary(&new).await?);
        }
    }
    Ok(created)
}
