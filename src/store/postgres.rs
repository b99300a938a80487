use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::model::Loan;
use crate::store::traits::{LoanStore, UpdateOutcome};

const LOAN_COLUMNS: &str = "id, amount, interest_rate, length_in_months, monthly_payment_amount, version, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Run embedded database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }
}

fn loan_from_row(row: &PgRow) -> Result<Loan> {
    Ok(Loan {
        id: row.try_get("id")?,
        amount: row.try_get("amount")?,
        interest_rate: row.try_get("interest_rate")?,
        length_in_months: row.try_get("length_in_months")?,
        monthly_payment_amount: row.try_get("monthly_payment_amount")?,
        version: row.try_get("version")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait::async_trait]
impl LoanStore for PostgresStore {
    async fn create(&self, loan: Loan) -> Result<Loan> {
        sqlx::query(
            r#"
            INSERT INTO loans (id, amount, interest_rate, length_in_months, monthly_payment_amount, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(loan.id)
        .bind(loan.amount)
        .bind(loan.interest_rate)
        .bind(loan.length_in_months)
        .bind(loan.monthly_payment_amount)
        .bind(loan.version)
        .bind(loan.created_at)
        .bind(loan.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert loan")?;

        // Returned as submitted so decimals keep the caller's scale rather
        // than the column scale.
        Ok(loan)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Loan>> {
        let row = sqlx::query(&format!("SELECT {LOAN_COLUMNS} FROM loans WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch loan")?;

        let Some(row) = row else {
            return Ok(None);
        };

        loan_from_row(&row).map(Some)
    }

    async fn update_if_version_matches(&self, loan: &Loan) -> Result<UpdateOutcome> {
        // Zero rows back means the stored version moved on or the row is gone.
        let row = sqlx::query(
            r#"
            UPDATE loans SET
                amount = $3,
                interest_rate = $4,
                length_in_months = $5,
                monthly_payment_amount = $6,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1 AND version = $2
            RETURNING version, updated_at
            "#,
        )
        .bind(loan.id)
        .bind(loan.version)
        .bind(loan.amount)
        .bind(loan.interest_rate)
        .bind(loan.length_in_months)
        .bind(loan.monthly_payment_amount)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update loan")?;

        let Some(row) = row else {
            return Ok(UpdateOutcome::Conflict);
        };

        let mut committed = loan.clone();
        committed.version = row.try_get("version")?;
        committed.updated_at = row.try_get("updated_at")?;
        Ok(UpdateOutcome::Applied(committed))
    }
}
