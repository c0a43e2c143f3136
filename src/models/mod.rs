pub mod assignment;
pub mod department;
pub mod employee;
pub mod project;
pub mod salary;

pub use assignment::Assignment;
pub use department::{Department, DepartmentName, NewDepartment};
pub use employee::{Employee, EmployeeWithRelations, NewEmployee};
pub use project::{NewProject, Project, ProjectStatus};
pub use salary::{NewSalary, PaymentMethod, Salary};

use thiserror::Error;

/// A stored label that does not name any variant of a closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}
