use anyhow::Result;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::model::Loan;
use crate::store::traits::{LoanStore, UpdateOutcome};

/// In-process store with the same compare-and-swap semantics as the
/// PostgreSQL backend. Used for tests and for running without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    loans: RwLock<HashMap<Uuid, Loan>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.loans.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.read().is_empty()
    }
}

#[async_trait::async_trait]
impl LoanStore for MemoryStore {
    async fn create(&self, loan: Loan) -> Result<Loan> {
        self.loans.write().insert(loan.id, loan.clone());
        Ok(loan)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Loan>> {
        Ok(self.loans.read().get(id).cloned())
    }

    async fn update_if_version_matches(&self, loan: &Loan) -> Result<UpdateOutcome> {
        let mut loans = self.loans.write();

        let Some(stored) = loans.get_mut(&loan.id) else {
            return Ok(UpdateOutcome::Conflict);
        };
        if stored.version != loan.version {
            return Ok(UpdateOutcome::Conflict);
        }

        stored.replace_fields(loan.fields());
        stored.version += 1;
        stored.updated_at = Utc::now();

        Ok(UpdateOutcome::Applied(stored.clone()))
    }
}
