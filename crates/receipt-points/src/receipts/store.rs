use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use super::domain::{Receipt, ReceiptId};
use super::scoring::{ScoreComponent, ScoreOutcome};

/// Accepted receipt together with the points it earned at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub receipt: Receipt,
    pub points: i64,
    pub components: Vec<ScoreComponent>,
}

impl ScoreRecord {
    pub fn id(&self) -> ReceiptId {
        ReceiptId(self.receipt.id.clone())
    }
}

/// Result of a `put`: either a new record or the one already holding the same
/// purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome {
    Created(ReceiptId),
    Duplicate(ReceiptId),
}

impl PutOutcome {
    pub fn id(&self) -> &ReceiptId {
        match self {
            PutOutcome::Created(id) | PutOutcome::Duplicate(id) => id,
        }
    }

    pub fn into_id(self) -> ReceiptId {
        match self {
            PutOutcome::Created(id) | PutOutcome::Duplicate(id) => id,
        }
    }
}

/// Storage abstraction so the service can be exercised against failing stores.
pub trait ReceiptStore: Send + Sync {
    /// Store a scored receipt, or return the id of an identical one already
    /// stored. The duplicate check and the insert must be atomic.
    fn put(&self, receipt: Receipt, outcome: ScoreOutcome) -> Result<PutOutcome, RepositoryError>;
    fn get(&self, id: &ReceiptId) -> Result<Option<ScoreRecord>, RepositoryError>;
    fn len(&self) -> Result<usize, RepositoryError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("receipt store unavailable: {0}")]
    Unavailable(String),
}

/// Process-lifetime store guarded by a readers-writer lock.
#[derive(Debug, Default, Clone)]
pub struct InMemoryReceiptStore {
    records: Arc<RwLock<HashMap<ReceiptId, ScoreRecord>>>,
}

impl InMemoryReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("receipt store lock poisoned".to_string())
}

impl ReceiptStore for InMemoryReceiptStore {
    fn put(
        &self,
        mut receipt: Receipt,
        outcome: ScoreOutcome,
    ) -> Result<PutOutcome, RepositoryError> {
        let mut guard = self.records.write().map_err(poisoned)?;

        if let Some(existing) = guard
            .values()
            .find(|record| record.receipt.same_purchase(&receipt))
        {
            return Ok(PutOutcome::Duplicate(existing.id()));
        }

        let mut id = ReceiptId::mint();
        while guard.contains_key(&id) {
            id = ReceiptId::mint();
        }

        receipt.id = id.0.clone();
        guard.insert(
            id.clone(),
            ScoreRecord {
                receipt,
                points: outcome.total,
                components: outcome.components,
            },
        );
        Ok(PutOutcome::Created(id))
    }

    fn get(&self, id: &ReceiptId) -> Result<Option<ScoreRecord>, RepositoryError> {
        if id.is_empty() {
            return Ok(None);
        }
        let guard = self.records.read().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    fn len(&self) -> Result<usize, RepositoryError> {
        let guard = self.records.read().map_err(poisoned)?;
        Ok(guard.len())
    }
}
