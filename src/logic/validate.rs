use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::model::LoanFields;

pub const AMOUNT: &str = "amount";
pub const INTEREST_RATE: &str = "interestRate";
pub const LENGTH_IN_MONTHS: &str = "lengthInMonths";
pub const MONTHLY_PAYMENT_AMOUNT: &str = "monthlyPaymentAmount";

pub const MIN_LENGTH_IN_MONTHS: i64 = 1;
pub const MAX_LENGTH_IN_MONTHS: i64 = 600;

/// Storage layout: NUMERIC(19,4) for money, NUMERIC(10,6) for the rate.
const MONEY_INTEGER_DIGITS: u32 = 15;
const MONEY_FRACTION_DIGITS: u32 = 4;
const RATE_FRACTION_DIGITS: u32 = 6;

/// A single rejected request field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type ValidationResult<T> = Result<T, Vec<FieldViolation>>;

/// Validates create/update request bodies.
///
/// Both operations take the same full set of fields. Violations are reported
/// one per field, in declaration order: `amount`, `interestRate`,
/// `lengthInMonths`, `monthlyPaymentAmount`.
pub struct LoanRequestValidator;

impl LoanRequestValidator {
    pub fn validate(body: &Value) -> ValidationResult<LoanFields> {
        let Some(object) = body.as_object() else {
            return Err(vec![FieldViolation::new("body", "must be a JSON object")]);
        };

        let mut violations = Vec::new();
        let amount = record(&mut violations, AMOUNT, Self::money(object, AMOUNT));
        let interest_rate = record(&mut violations, INTEREST_RATE, Self::rate(object, INTEREST_RATE));
        let length_in_months = record(
            &mut violations,
            LENGTH_IN_MONTHS,
            Self::term(object, LENGTH_IN_MONTHS),
        );
        let monthly_payment_amount = record(
            &mut violations,
            MONTHLY_PAYMENT_AMOUNT,
            Self::money(object, MONTHLY_PAYMENT_AMOUNT),
        );

        match (amount, interest_rate, length_in_months, monthly_payment_amount) {
            (Some(amount), Some(interest_rate), Some(length_in_months), Some(monthly_payment_amount)) => {
                Ok(LoanFields {
                    amount,
                    interest_rate,
                    length_in_months,
                    monthly_payment_amount,
                })
            }
            _ => Err(violations),
        }
    }

    fn money(object: &Map<String, Value>, field: &str) -> Result<Decimal, String> {
        let value = Self::decimal(object, field)?;
        if value <= Decimal::ZERO {
            return Err("must be greater than 0".to_string());
        }
        Self::check_digits(value, MONEY_INTEGER_DIGITS, MONEY_FRACTION_DIGITS)?;
        Ok(value)
    }

    fn rate(object: &Map<String, Value>, field: &str) -> Result<Decimal, String> {
        let value = Self::decimal(object, field)?;
        if value <= Decimal::ZERO {
            return Err("must be greater than 0".to_string());
        }
        if value > Decimal::ONE {
            return Err("must be less than or equal to 1.0".to_string());
        }
        Self::check_digits(value, 1, RATE_FRACTION_DIGITS)?;
        Ok(value)
    }

    fn term(object: &Map<String, Value>, field: &str) -> Result<i32, String> {
        let value = match object.get(field) {
            None | Some(Value::Null) => return Err("must not be null".to_string()),
            Some(Value::Number(number)) => number
                .as_i64()
                .ok_or_else(|| "must be an integer".to_string())?,
            Some(_) => return Err("must be an integer".to_string()),
        };

        if value < MIN_LENGTH_IN_MONTHS {
            return Err(format!("must be greater than or equal to {}", MIN_LENGTH_IN_MONTHS));
        }
        if value > MAX_LENGTH_IN_MONTHS {
            return Err(format!("must be less than or equal to {}", MAX_LENGTH_IN_MONTHS));
        }

        i32::try_from(value).map_err(|_| "must be an integer".to_string())
    }

    fn decimal(object: &Map<String, Value>, field: &str) -> Result<Decimal, String> {
        match object.get(field) {
            None | Some(Value::Null) => Err("must not be null".to_string()),
            Some(Value::Number(number)) => parse_decimal(&number.to_string())
                .ok_or_else(|| "must be a valid decimal number".to_string()),
            Some(_) => Err("must be a number".to_string()),
        }
    }

    fn check_digits(value: Decimal, integer_digits: u32, fraction_digits: u32) -> Result<(), String> {
        let normalized = value.normalize();
        let integer_limit = Decimal::from(10u64.pow(integer_digits));

        if normalized.scale() > fraction_digits || normalized.abs() >= integer_limit {
            return Err(format!(
                "numeric value out of bounds (<{} digits>.<{} digits> expected)",
                integer_digits, fraction_digits
            ));
        }
        Ok(())
    }
}

fn record<T>(violations: &mut Vec<FieldViolation>, field: &str, outcome: Result<T, String>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(message) => {
            violations.push(FieldViolation::new(field, message));
            None
        }
    }
}

/// Parse a JSON number token without going through a float.
fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str_exact(text)
        .or_else(|_| Decimal::from_str(text))
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
