//! Aggregate figures over the stored records.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::generator::factory::round2;
use crate::models::{Department, Employee, Project, Salary};

/// Hires on or after `today - RECENT_HIRE_DAYS` count as recent.
pub const RECENT_HIRE_DAYS: i64 = 90;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SalaryStatistics {
    pub average: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub standard_deviation: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HireCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BudgetShare {
    pub department: String,
    pub budget: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PieChart {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data_labels: Vec<String>,
    pub data_values: Vec<usize>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub data: Vec<f64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BarChart {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub categories: Vec<&'static str>,
    pub series: Vec<Series>,
}

/// Chart-ready views of the summary, for clients that draw their own charts.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChartConfigs {
    pub department_distribution: PieChart,
    /// Absent when there are no salaries.
    pub salary_statistics: Option<BarChart>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Summary {
    pub department_distribution: BTreeMap<String, usize>,
    pub salary_statistics: Option<SalaryStatistics>,
    pub project_status: BTreeMap<String, usize>,
    pub recent_hires_trend: Vec<HireCount>,
    pub budget_allocation: Vec<BudgetShare>,
    pub chart_configs: ChartConfigs,
}

pub fn summarize(
    departments: &[Department],
    employees: &[Employee],
    projects: &[Project],
    salaries: &[Salary],
    today: NaiveDate,
) -> Summary {
    let distribution = department_distribution(departments, employees);
    let statistics = salary_statistics(salaries);
    let chart_configs = chart_configs(&distribution, statistics.as_ref());
    Summary {
        department_distribution: distribution,
        salary_statistics: statistics,
        project_status: project_status(projects),
        recent_hires_trend: recent_hires(employees, today),
        budget_allocation: budget_allocation(departments),
        chart_configs,
    }
}

fn chart_configs(
    distribution: &BTreeMap<String, usize>,
    statistics: Option<&SalaryStatistics>,
) -> ChartConfigs {
    ChartConfigs {
        department_distribution: PieChart {
            kind: "pie",
            data_labels: distribution.keys().cloned().collect(),
            data_values: distribution.values().copied().collect(),
        },
        salary_statistics: statistics.map(|stats| BarChart {
            kind: "bar",
            categories: vec!["Average", "Minimum", "Maximum", "Std Dev"],
            series: vec![Series {
                name: "Salary",
                data: vec![
                    stats.average,
                    stats.minimum,
                    stats.maximum,
                    stats.standard_deviation,
                ],
            }],
        }),
    }
}

/// Employee head count per department name. Departments without employees
/// are left out.
fn department_distribution(
    departments: &[Department],
    employees: &[Employee],
) -> BTreeMap<String, usize> {
    let names: HashMap<i32, &str> = departments
        .iter()
        .map(|d| (d.id, d.name.as_str()))
        .collect();
    let mut distribution = BTreeMap::new();
    for employee in employees {
        if let Some(name) = employee.department_id.and_then(|id| names.get(&id)) {
            *distribution.entry(name.to_string()).or_insert(0) += 1;
        }
    }
    distribution
}

fn salary_statistics(salaries: &[Salary]) -> Option<SalaryStatistics> {
    if salaries.is_empty() {
        return None;
    }
    let n = salaries.len() as f64;
    let amounts = salaries.iter().map(|s| s.amount);
    let mean = amounts.clone().sum::<f64>() / n;
    let minimum = amounts.clone().fold(f64::INFINITY, f64::min);
    let maximum = amounts.clone().fold(f64::NEG_INFINITY, f64::max);
    // sample standard deviation; undefined below two samples
    let standard_deviation = if salaries.len() < 2 {
        0.0
    } else {
        let variance = amounts.map(|a| (a - mean).powi(2)).sum::<f64>() / (n - 1.0);
        variance.sqrt()
    };
    Some(SalaryStatistics {
        average: round2(mean),
        minimum: round2(minimum),
        maximum: round2(maximum),
        standard_deviation: round2(standard_deviation),
    })
}

fn project_status(projects: &[Project]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for project in projects {
        *counts.entry(project.status.to_string()).or_insert(0) += 1;
    }
    counts
}

fn recent_hires(employees: &[Employee], today: NaiveDate) -> Vec<HireCount> {
    let since = today - Duration::days(RECENT_HIRE_DAYS);
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for employee in employees.iter().filter(|e| e.hire_date >= since) {
        *per_day.entry(employee.hire_date).or_insert(0) += 1;
    }
    per_day
        .into_iter()
        .map(|(date, count)| HireCount { date, count })
        .collect()
}

fn budget_allocation(departments: &[Department]) -> Vec<BudgetShare> {
    let mut shares: Vec<BudgetShare> = departments
        .iter()
        .map(|d| BudgetShare {
            department: d.name.clone(),
            budget: d.budget,
        })
        .collect();
    shares.sort_by(|a, b| b.budget.total_cmp(&a.budget));
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentMethod, ProjectStatus};
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn department(id: i32, name: &str, budget: f64) -> Department {
        Department {
            id,
            name: name.to_string(),
            location: "Reno, NV".to_string(),
            budget,
            head_of_department: "Pat Doe".to_string(),
            established_date: date(2020, 1, 1),
            employee_count: 0,
        }
    }

    fn employee(id: i32, department_id: Option<i32>, hire_date: NaiveDate) -> Employee {
        Employee {
            id,
            first_name: "Sam".to_string(),
            last_name: "Roe".to_string(),
            email: format!("sam{id}@example.com"),
            phone: "+1-555-555-0000".to_string(),
            hire_date,
            job_title: "Sales Executive".to_string(),
            department_id,
        }
    }

    fn salary(id: i32, amount: f64) -> Salary {
        Salary {
            id,
            employee_id: 1,
            amount,
            payment_date: date(2024, 1, 1),
            tax_deduction: 0.0,
            bonus: 0.0,
            payment_method: PaymentMethod::Check,
        }
    }

    fn project(id: i32, status: ProjectStatus) -> Project {
        Project {
            id,
            name: format!("Project {id}"),
            description: None,
            start_date: date(2024, 1, 1),
            end_date: None,
            budget: 1.0,
            status,
            department_id: 1,
        }
    }

    #[test]
    fn summary_of_empty_store() {
        let summary = summarize(&[], &[], &[], &[], date(2024, 6, 1));
        assert!(summary.department_distribution.is_empty());
        assert_eq!(summary.salary_statistics, None);
        assert!(summary.recent_hires_trend.is_empty());
    }

    #[test]
    fn distribution_skips_unassigned_and_empty_departments() {
        let departments = vec![department(1, "HR", 10.0), department(2, "Sales", 20.0)];
        let today = date(2024, 6, 1);
        let employees = vec![
            employee(1, Some(1), today),
            employee(2, Some(1), today),
            employee(3, None, today),
        ];
        let summary = summarize(&departments, &employees, &[], &[], today);
        assert_eq!(summary.department_distribution.len(), 1);
        assert_eq!(summary.department_distribution["HR"], 2);
    }

    #[test]
    fn salary_statistics_use_sample_deviation() {
        let salaries = vec![salary(1, 2.0), salary(2, 4.0), salary(3, 4.0), salary(4, 6.0)];
        let stats = salary_statistics(&salaries).unwrap();
        assert_eq!(stats.average, 4.0);
        assert_eq!(stats.minimum, 2.0);
        assert_eq!(stats.maximum, 6.0);
        // variance = 8 / 3
        assert_eq!(stats.standard_deviation, 1.63);

        let single = salary_statistics(&[salary(1, 50_000.0)]).unwrap();
        assert_eq!(single.standard_deviation, 0.0);
    }

    #[test]
    fn recent_hires_are_grouped_by_day_in_order() {
        let today = date(2024, 6, 1);
        let employees = vec![
            employee(1, None, date(2024, 5, 20)),
            employee(2, None, date(2024, 3, 5)),
            employee(3, None, date(2024, 5, 20)),
            employee(4, None, date(2024, 3, 1)),
            employee(5, None, date(2023, 1, 1)),
        ];
        let trend = recent_hires(&employees, today);
        assert_eq!(
            trend,
            vec![
                HireCount { date: date(2024, 3, 5), count: 1 },
                HireCount { date: date(2024, 5, 20), count: 2 },
            ]
        );
    }

    #[rstest]
    #[case(date(2024, 3, 3), 1)]
    #[case(date(2024, 3, 2), 0)]
    #[case(date(2024, 6, 1), 1)]
    fn recent_window_includes_its_first_day(#[case] hired: NaiveDate, #[case] expected: usize) {
        // 2024-06-01 minus 90 days is 2024-03-03
        let trend = recent_hires(&[employee(1, None, hired)], date(2024, 6, 1));
        assert_eq!(trend.len(), expected);
    }

    #[test]
    fn budgets_are_ordered_largest_first() {
        let departments = vec![
            department(1, "HR", 100.0),
            department(2, "Finance", 300.0),
            department(3, "Sales", 200.0),
        ];
        let order: Vec<String> = budget_allocation(&departments)
            .into_iter()
            .map(|b| b.department)
            .collect();
        assert_eq!(order, vec!["Finance", "Sales", "HR"]);
    }

    #[test]
    fn project_statuses_are_counted_by_label() {
        let projects = vec![
            project(1, ProjectStatus::OnHold),
            project(2, ProjectStatus::OnHold),
            project(3, ProjectStatus::Active),
        ];
        let counts = project_status(&projects);
        assert_eq!(counts["On Hold"], 2);
        assert_eq!(counts["Active"], 1);
    }

    #[test]
    fn chart_configs_mirror_the_aggregates() {
        let departments = vec![department(1, "Sales", 10.0), department(2, "HR", 20.0)];
        let today = date(2024, 6, 1);
        let employees = vec![
            employee(1, Some(1), today),
            employee(2, Some(2), today),
            employee(3, Some(1), today),
        ];
        let salaries = vec![salary(1, 100.0), salary(2, 300.0)];
        let summary = summarize(&departments, &employees, &[], &salaries, today);

        let pie = &summary.chart_configs.department_distribution;
        assert_eq!(pie.kind, "pie");
        assert_eq!(pie.data_labels, vec!["HR", "Sales"]);
        assert_eq!(pie.data_values, vec![1, 2]);

        let bar = summary.chart_configs.salary_statistics.unwrap();
        assert_eq!(bar.categories.len(), 4);
        assert_eq!(bar.series[0].data[..3], [200.0, 100.0, 300.0]);

        let empty = summarize(&[], &[], &[], &[], today);
        assert!(empty.chart_configs.salary_statistics.is_none());
        assert!(empty.chart_configs.department_distribution.data_labels.is_empty());
    }
}
