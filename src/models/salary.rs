use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use std::fmt;
use std::str::FromStr;

use super::UnknownVariant;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    Check,
    #[serde(rename = "Direct Deposit")]
    DirectDeposit,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::BankTransfer,
        PaymentMethod::Check,
        PaymentMethod::DirectDeposit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Check => "Check",
            PaymentMethod::DirectDeposit => "Direct Deposit",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("payment method", s))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Salary {
    pub id: i32,
    pub employee_id: i32,
    pub amount: f64,
    pub payment_date: NaiveDate,
    pub tax_deduction: f64,
    pub bonus: f64,
    pub payment_method: PaymentMethod,
}

impl<'r> FromRow<'r, PgRow> for Salary {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let payment_method: String = row.try_get("payment_method")?;
        Ok(Salary {
            id: row.try_get("id")?,
            employee_id: row.try_get("employee_id")?,
            amount: row.try_get("amount")?,
            payment_date: row.try_get("payment_date")?,
            tax_deduction: row.try_get("tax_deduction")?,
            bonus: row.try_get("bonus")?,
            payment_method: payment_method
                .parse()
                .map_err(|err| sqlx::Error::ColumnDecode {
                    index: "payment_method".to_string(),
                    source: Box::new(err),
                })?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSalary {
    pub employee_id: i32,
    pub amount: f64,
    pub payment_date: NaiveDate,
    pub tax_deduction: f64,
    pub bonus: f64,
    pub payment_method: PaymentMethod,
}
