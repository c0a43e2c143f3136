use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::UnknownVariant;

/// Canonical department names. Generated departments beyond these get a
/// numeric suffix, so stored names are plain strings.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepartmentName {
    #[serde(rename = "HR")]
    Hr,
    Engineering,
    Marketing,
    Finance,
    Sales,
}

impl DepartmentName {
    pub const ALL: [DepartmentName; 5] = [
        DepartmentName::Hr,
        DepartmentName::Engineering,
        DepartmentName::Marketing,
        DepartmentName::Finance,
        DepartmentName::Sales,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DepartmentName::Hr => "HR",
            DepartmentName::Engineering => "Engineering",
            DepartmentName::Marketing => "Marketing",
            DepartmentName::Finance => "Finance",
            DepartmentName::Sales => "Sales",
        }
    }
}

impl fmt::Display for DepartmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DepartmentName {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DepartmentName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("department name", s))
    }
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Department {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub budget: f64,
    pub head_of_department: String,
    pub established_date: NaiveDate,
    pub employee_count: i32,
}

/// Insert form of [`Department`]; the store assigns `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDepartment {
    pub name: String,
    pub location: String,
    pub budget: f64,
    pub head_of_department: String,
    pub established_date: NaiveDate,
    pub employee_count: i32,
}
