use crate::model::Loan;
use anyhow::Result;
use uuid::Uuid;

/// Result of a version-checked write.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The stored version matched; carries the record as committed.
    Applied(Loan),
    /// The stored version moved on (or the row vanished) since it was read.
    Conflict,
}

#[async_trait::async_trait]
pub trait LoanStore: Send + Sync {
    /// Insert a new record unconditionally and return it as stored
    async fn create(&self, loan: Loan) -> Result<Loan>;
    /// Get a record by id
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Loan>>;
    /// Replace the business fields of `loan` if the stored version still equals
    /// `loan.version`. On success the version is incremented by exactly one and
    /// `updated_at` refreshed.
    async fn update_if_version_matches(&self, loan: &Loan) -> Result<UpdateOutcome>;
}
