use chrono::{NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

use crate::errors::AppError;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(AppError::from)
}

pub fn validate_positive(value: f64) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("must be greater than zero"))
    }
}

/// Optional leading `+`, then 10 to 15 digits, spaces or dashes.
pub static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s-]{10,15}$").expect("valid phone regex"));

pub fn validate_not_future(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date <= Utc::now().date_naive() {
        Ok(())
    } else {
        Err(ValidationError::new("date cannot be in the future"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("+1-555-123-4567", true)]
    #[case("555 123 4567", true)]
    #[case("+1-555", false)]
    #[case("+1-555-CALL-NOW", false)]
    #[case("+1-555-123-4567-8901", false)]
    #[case("+١٢٣٤٥٦٧٨٩٠", true)]
    #[case("++5551234567", false)]
    fn phone_pattern(#[case] phone: &str, #[case] valid: bool) {
        assert_eq!(PHONE_RE.is_match(phone), valid);
    }

    #[test]
    fn future_dates_are_rejected() {
        let tomorrow = Utc::now().date_naive().succ_opt().unwrap();
        assert!(validate_not_future(&tomorrow).is_err());
        assert!(validate_not_future(&Utc::now().date_naive()).is_ok());
    }

    #[rstest]
    #[case(0.0, false)]
    #[case(-1.0, false)]
    #[case(0.01, true)]
    fn positive_amounts(#[case] value: f64, #[case] ok: bool) {
        assert_eq!(validate_positive(value).is_ok(), ok);
    }
}
