use anyhow::Result;
use uuid::Uuid;

use crate::model::{Loan, LoanFields};
use crate::store::traits::{LoanStore, UpdateOutcome};

pub struct LoanOperations;

/// Typed result of a full-replacement update.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateResult {
    Updated(Loan),
    NotFound,
    /// Another writer committed between our read and our write.
    Conflict,
}

impl LoanOperations {
    /// Create a loan with a fresh id and initial version
    pub async fn create<S: LoanStore>(store: &S, fields: LoanFields) -> Result<Loan> {
        log::info!(
            "Creating loan: amount={}, interestRate={}, lengthInMonths={}",
            fields.amount,
            fields.interest_rate,
            fields.length_in_months
        );

        let saved = store.create(Loan::new(fields)).await?;
        log::info!("Loan created with id={}", saved.id);
        Ok(saved)
    }

    pub async fn find_by_id<S: LoanStore>(store: &S, id: &Uuid) -> Result<Option<Loan>> {
        log::debug!("Fetching loan id={}", id);
        let loan = store.find_by_id(id).await?;
        if loan.is_some() {
            log::debug!("Loan found id={}", id);
        }
        Ok(loan)
    }

    /// Replace every business field of an existing loan.
    ///
    /// Performs one read and, if the loan exists, one version-checked write.
    /// A lost race is reported as [`UpdateResult::Conflict`]; retrying with a
    /// fresh read is left to the caller.
    pub async fn update<S: LoanStore>(store: &S, id: &Uuid, fields: LoanFields) -> Result<UpdateResult> {
        log::info!("Updating loan id={}", id);

        let Some(mut loan) = store.find_by_id(id).await? else {
            return Ok(UpdateResult::NotFound);
        };
        let read_version = loan.version;
        loan.replace_fields(fields);

        match store.update_if_version_matches(&loan).await? {
            UpdateOutcome::Applied(updated) => {
                log::info!("Loan updated id={} version={}", updated.id, updated.version);
                Ok(UpdateResult::Updated(updated))
            }
            UpdateOutcome::Conflict => {
                log::warn!(
                    "Loan id={} was modified concurrently, update from version {} rejected",
                    id,
                    read_version
                );
                Ok(UpdateResult::Conflict)
            }
        }
    }
}
