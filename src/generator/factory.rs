//! Randomized field values for generated records.
//!
//! Every function takes the random source as an argument, and every date is
//! drawn from bounds supplied by the caller. That is what lets later stages
//! of the pipeline keep their rows ordered after the rows they depend on.

use chrono::{Duration, Months, NaiveDate};
use fake::faker::address::raw::{CityName, StateAbbr};
use fake::faker::internet::raw::SafeEmail;
use fake::faker::lorem::raw::Sentence;
use fake::faker::name::raw::{FirstName, LastName, Name};
use fake::locales::EN;
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::ops::RangeInclusive;

use super::error::GenerationError;
use crate::models::{
    Assignment, Department, DepartmentName, Employee, NewDepartment, NewEmployee, NewProject,
    NewSalary, PaymentMethod, Project, ProjectStatus,
};

pub const DEPARTMENT_BUDGET: RangeInclusive<f64> = 100_000.0..=500_000.0;
pub const PROJECT_BUDGET: RangeInclusive<f64> = 20_000.0..=150_000.0;
pub const BASE_SALARY: RangeInclusive<f64> = 45_000.0..=120_000.0;

/// Range for the numeric suffix of synthesized department names.
pub const NAME_SUFFIX: RangeInclusive<u32> = 1..=100;

/// Departments are established at most this long before today.
const DEPARTMENT_MAX_AGE_MONTHS: u32 = 60;
const PROJECT_START_MONTHS_BEFORE: u32 = 12;
const PROJECT_START_MONTHS_AFTER: u32 = 6;
const PROJECT_MIN_DAYS: i64 = 30;
const PROJECT_MAX_DAYS: i64 = 180;
/// Assignees join within this many days of the project start.
pub const JOIN_WINDOW_DAYS: i64 = 30;

const MAX_EMAIL_ATTEMPTS: usize = 100;

pub const JOB_TITLES: [&str; 6] = [
    "Software Engineer",
    "HR Manager",
    "Marketing Specialist",
    "Financial Analyst",
    "Sales Executive",
    "Product Manager",
];

pub const ASSIGNMENT_ROLES: [&str; 3] = ["Lead", "Member", "Contributor"];

const PROJECT_COLORS: [&str; 16] = [
    "Amber", "Azure", "Coral", "Crimson", "Cyan", "Emerald", "Indigo", "Ivory", "Jade", "Lavender",
    "Magenta", "Maroon", "Olive", "Orchid", "Teal", "Violet",
];

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Uniform amount in `range`, rounded to cents.
pub fn money<R: Rng>(rng: &mut R, range: RangeInclusive<f64>) -> f64 {
    round2(rng.gen_range(range))
}

/// Uniform date in `[start, end]`, both ends inclusive.
pub fn date_between<R: Rng>(
    rng: &mut R,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<NaiveDate, GenerationError> {
    if start > end {
        return Err(GenerationError::InvalidDateRange { start, end });
    }
    let span = (end - start).num_days();
    Ok(start + Duration::days(rng.gen_range(0..=span)))
}

pub fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

pub fn months_after(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// `+1-NNN-NNN-NNNN`
pub fn phone<R: Rng>(rng: &mut R) -> String {
    format!(
        "+1-{}-{}-{}",
        rng.gen_range(200..=999),
        rng.gen_range(200..=999),
        rng.gen_range(1000..=9999)
    )
}

/// How a department name was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStrategy {
    /// Drawn without replacement from [`DepartmentName::ALL`].
    Canonical,
    /// A re-sampled canonical name plus a numeric suffix. Not checked for
    /// uniqueness, so two suffixed names can collide; the store's unique
    /// constraint then fails the whole request.
    Suffixed,
}

/// Hands out department names: canonical names first, then suffixed ones.
#[derive(Debug)]
pub struct DepartmentNamer {
    remaining: Vec<DepartmentName>,
}

impl DepartmentNamer {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut remaining = DepartmentName::ALL.to_vec();
        remaining.shuffle(rng);
        DepartmentNamer { remaining }
    }

    pub fn next_name<R: Rng>(&mut self, rng: &mut R) -> (String, NameStrategy) {
        match self.remaining.pop() {
            Some(name) => (name.to_string(), NameStrategy::Canonical),
            None => (suffixed_name(rng), NameStrategy::Suffixed),
        }
    }
}

fn suffixed_name<R: Rng>(rng: &mut R) -> String {
    let base = DepartmentName::ALL
        .choose(rng)
        .copied()
        .unwrap_or(DepartmentName::Hr);
    format!("{} {}", base, rng.gen_range(NAME_SUFFIX))
}

pub fn department<R: Rng>(
    rng: &mut R,
    name: String,
    employee_count: i32,
    today: NaiveDate,
) -> Result<NewDepartment, GenerationError> {
    let city: String = CityName(EN).fake_with_rng(rng);
    let state: String = StateAbbr(EN).fake_with_rng(rng);
    let oldest = months_before(today, DEPARTMENT_MAX_AGE_MONTHS);
    Ok(NewDepartment {
        name,
        location: format!("{city}, {state}"),
        budget: money(rng, DEPARTMENT_BUDGET),
        head_of_department: Name(EN).fake_with_rng(rng),
        established_date: date_between(rng, oldest, today)?,
        employee_count,
    })
}

/// A new employee hired between the department's founding and `today`.
/// `used_emails` carries the addresses already handed out in this request.
pub fn employee<R: Rng>(
    rng: &mut R,
    department: &Department,
    today: NaiveDate,
    used_emails: &mut HashSet<String>,
) -> Result<NewEmployee, GenerationError> {
    let email = unique_email(rng, used_emails)?;
    Ok(NewEmployee {
        first_name: FirstName(EN).fake_with_rng(rng),
        last_name: LastName(EN).fake_with_rng(rng),
        email,
        phone: phone(rng),
        hire_date: date_between(rng, department.established_date, today)?,
        job_title: pick(rng, &JOB_TITLES).to_string(),
        department_id: Some(department.id),
    })
}

fn unique_email<R: Rng>(
    rng: &mut R,
    used_emails: &mut HashSet<String>,
) -> Result<String, GenerationError> {
    for _ in 0..MAX_EMAIL_ATTEMPTS {
        let candidate: String = SafeEmail(EN).fake_with_rng(rng);
        if used_emails.insert(candidate.clone()) {
            return Ok(candidate);
        }
    }
    Err(GenerationError::EmailsExhausted {
        max_attempts: MAX_EMAIL_ATTEMPTS,
    })
}

pub fn project<R: Rng>(
    rng: &mut R,
    department_id: i32,
    today: NaiveDate,
) -> Result<NewProject, GenerationError> {
    let start_date = date_between(
        rng,
        months_before(today, PROJECT_START_MONTHS_BEFORE),
        months_after(today, PROJECT_START_MONTHS_AFTER),
    )?;
    let end_date = date_between(
        rng,
        start_date + Duration::days(PROJECT_MIN_DAYS),
        start_date + Duration::days(PROJECT_MAX_DAYS),
    )?;
    let description: String = Sentence(EN, 10..11).fake_with_rng(rng);
    Ok(NewProject {
        name: format!("Project {}", pick(rng, &PROJECT_COLORS)),
        description: Some(description),
        start_date,
        end_date: Some(end_date),
        budget: money(rng, PROJECT_BUDGET),
        status: *pick(rng, &ProjectStatus::ALL),
        department_id,
    })
}

pub fn assignment<R: Rng>(
    rng: &mut R,
    employee: &Employee,
    project: &Project,
) -> Result<Assignment, GenerationError> {
    let join_date = date_between(
        rng,
        project.start_date,
        project.start_date + Duration::days(JOIN_WINDOW_DAYS),
    )?;
    Ok(Assignment {
        employee_id: employee.id,
        project_id: project.id,
        role: pick(rng, &ASSIGNMENT_ROLES).to_string(),
        join_date,
    })
}

/// One pay slip derived from the employee's `base` salary.
pub fn salary<R: Rng>(
    rng: &mut R,
    employee: &Employee,
    base: f64,
    today: NaiveDate,
) -> Result<NewSalary, GenerationError> {
    Ok(NewSalary {
        employee_id: employee.id,
        amount: round2(base * rng.gen_range(0.9..=1.1)),
        payment_date: date_between(rng, employee.hire_date, today)?,
        tax_deduction: round2(base * 0.2 * rng.gen_range(0.8..=1.2)),
        bonus: round2(base * 0.1 * rng.gen::<f64>()),
        payment_method: *pick(rng, &PaymentMethod::ALL),
    })
}

// every pool passed here is a non-empty constant array
fn pick<'a, T, R: Rng>(rng: &mut R, pool: &'a [T]) -> &'a T {
    let index = rng.gen_range(0..pool.len());
    &pool[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::{fixture, rstest};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[fixture]
    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn sample_department() -> Department {
        Department {
            id: 4,
            name: "Engineering".to_string(),
            location: "Austin, TX".to_string(),
            budget: 300_000.0,
            head_of_department: "Linus Torvalds".to_string(),
            established_date: date(2022, 6, 1),
            employee_count: 5,
        }
    }

    #[rstest]
    fn phone_has_fixed_shape(mut rng: StdRng) {
        for _ in 0..50 {
            let number = phone(&mut rng);
            let groups: Vec<&str> = number.split('-').collect();
            assert_eq!(groups.len(), 4, "{number}");
            assert_eq!(groups[0], "+1");
            let area: u32 = groups[1].parse().unwrap();
            let exchange: u32 = groups[2].parse().unwrap();
            let line: u32 = groups[3].parse().unwrap();
            assert!((200..=999).contains(&area));
            assert!((200..=999).contains(&exchange));
            assert!((1000..=9999).contains(&line));
        }
    }

    #[rstest]
    fn dates_stay_inside_bounds(mut rng: StdRng) {
        let start = date(2024, 2, 27);
        let end = date(2024, 3, 2);
        for _ in 0..100 {
            let d = date_between(&mut rng, start, end).unwrap();
            assert!(d >= start && d <= end);
        }
        assert_eq!(date_between(&mut rng, start, start).unwrap(), start);
    }

    #[rstest]
    fn reversed_date_range_is_an_error(mut rng: StdRng) {
        let err = date_between(&mut rng, date(2024, 5, 1), date(2024, 4, 1)).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidDateRange { .. }));
    }

    #[rstest]
    #[case(1234.5678, 1234.57)]
    #[case(0.004, 0.0)]
    #[case(-3.333, -3.33)]
    fn rounds_to_cents(#[case] raw: f64, #[case] expected: f64) {
        assert!((round2(raw) - expected).abs() < 1e-9);
    }

    #[rstest]
    fn money_respects_range(mut rng: StdRng) {
        for _ in 0..100 {
            let amount = money(&mut rng, PROJECT_BUDGET);
            assert!(PROJECT_BUDGET.contains(&amount));
            assert_eq!(round2(amount), amount);
        }
    }

    #[rstest]
    fn namer_exhausts_canonical_names_before_suffixing(mut rng: StdRng) {
        let mut namer = DepartmentNamer::new(&mut rng);
        let mut canonical = HashSet::new();
        for _ in 0..DepartmentName::ALL.len() {
            let (name, strategy) = namer.next_name(&mut rng);
            assert_eq!(strategy, NameStrategy::Canonical);
            assert!(name.parse::<DepartmentName>().is_ok());
            canonical.insert(name);
        }
        assert_eq!(canonical.len(), DepartmentName::ALL.len());

        for _ in 0..20 {
            let (name, strategy) = namer.next_name(&mut rng);
            assert_eq!(strategy, NameStrategy::Suffixed);
            let (base, suffix) = name.rsplit_once(' ').unwrap();
            assert!(base.parse::<DepartmentName>().is_ok());
            assert!(NAME_SUFFIX.contains(&suffix.parse::<u32>().unwrap()));
        }
    }

    #[rstest]
    fn employee_is_hired_within_department_lifetime(mut rng: StdRng) {
        let dept = sample_department();
        let today = date(2024, 1, 10);
        let mut used = HashSet::new();
        for _ in 0..30 {
            let emp = employee(&mut rng, &dept, today, &mut used).unwrap();
            assert!(emp.hire_date >= dept.established_date && emp.hire_date <= today);
            assert_eq!(emp.department_id, Some(dept.id));
            assert!(JOB_TITLES.contains(&emp.job_title.as_str()));
        }
        assert_eq!(used.len(), 30);
    }

    #[rstest]
    fn project_window_follows_start_date(mut rng: StdRng) {
        let today = date(2024, 8, 31);
        for _ in 0..50 {
            let p = project(&mut rng, 1, today).unwrap();
            let end = p.end_date.unwrap();
            assert!(p.start_date >= months_before(today, 12));
            assert!(p.start_date <= months_after(today, 6));
            assert!(end >= p.start_date + Duration::days(30));
            assert!(end <= p.start_date + Duration::days(180));
            assert!(p.name.starts_with("Project "));
        }
    }

    #[rstest]
    fn salary_components_track_base(mut rng: StdRng) {
        let emp = Employee {
            id: 9,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            phone: "+1-555-555-5555".to_string(),
            hire_date: date(2023, 1, 1),
            job_title: "HR Manager".to_string(),
            department_id: Some(1),
        };
        let base = 60_000.0;
        let today = date(2024, 1, 1);
        for _ in 0..50 {
            let s = salary(&mut rng, &emp, base, today).unwrap();
            assert!(s.amount >= 54_000.0 && s.amount <= 66_000.0);
            assert!(s.tax_deduction >= 9_600.0 && s.tax_deduction <= 14_400.0);
            assert!(s.bonus >= 0.0 && s.bonus <= 6_000.0);
            assert!(s.payment_date >= emp.hire_date && s.payment_date <= today);
        }
    }
}
