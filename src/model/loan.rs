use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Caller-owned business fields of a loan.
///
/// Values of this type have passed request validation: every field is present
/// and inside its declared bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanFields {
    pub amount: Decimal,
    pub interest_rate: Decimal,
    pub length_in_months: i32,
    pub monthly_payment_amount: Decimal,
}

/// A persisted loan record.
#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    pub id: Uuid,
    pub amount: Decimal,
    pub interest_rate: Decimal,
    pub length_in_months: i32,
    pub monthly_payment_amount: Decimal,
    /// Optimistic concurrency token.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Loan {
    pub fn new(fields: LoanFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            amount: fields.amount,
            interest_rate: fields.interest_rate,
            length_in_months: fields.length_in_months,
            monthly_payment_amount: fields.monthly_payment_amount,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite all business fields. Identity, version and creation time are
    /// left for the store to manage.
    pub fn replace_fields(&mut self, fields: LoanFields) {
        self.amount = fields.amount;
        self.interest_rate = fields.interest_rate;
        self.length_in_months = fields.length_in_months;
        self.monthly_payment_amount = fields.monthly_payment_amount;
    }

    pub fn fields(&self) -> LoanFields {
        LoanFields {
            amount: self.amount,
            interest_rate: self.interest_rate,
            length_in_months: self.length_in_months,
            monthly_payment_amount: self.monthly_payment_amount,
        }
    }
}
