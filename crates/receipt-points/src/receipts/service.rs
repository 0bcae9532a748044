use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{Receipt, ReceiptId};
use super::scoring::{CalculationError, PointsEngine, ScoreOutcome};
use super::store::{PutOutcome, ReceiptStore, RepositoryError, ScoreRecord};
use super::validation::{ReceiptValidator, ValidationError};

/// Service running validation, scoring and storage for submitted receipts.
pub struct ReceiptPointsService<S> {
    validator: ReceiptValidator,
    engine: PointsEngine,
    store: Arc<S>,
}

impl<S> ReceiptPointsService<S>
where
    S: ReceiptStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            validator: ReceiptValidator::new(),
            engine: PointsEngine::new(),
            store,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Validate, score and store a receipt, returning its identifier.
    ///
    /// Resubmitting an identical receipt returns the id of the stored one.
    pub fn submit(&self, receipt: Receipt) -> Result<ReceiptId, ReceiptServiceError> {
        let outcome = self.preview(&receipt)?;
        let points = outcome.total;

        match self.store.put(receipt, outcome)? {
            PutOutcome::Created(id) => {
                info!(receipt_id = %id, points, "stored new receipt");
                Ok(id)
            }
            PutOutcome::Duplicate(id) => {
                info!(receipt_id = %id, "receipt resubmitted, returning existing id");
                Ok(id)
            }
        }
    }

    /// Validate and score without storing anything.
    pub fn preview(&self, receipt: &Receipt) -> Result<ScoreOutcome, ReceiptServiceError> {
        let validated = self.validator.validate(receipt).inspect_err(|err| {
            warn!(field = err.field().label(), error = %err, "rejected receipt");
        })?;
        debug!(
            retailer = %validated.retailer,
            items = validated.items.len(),
            total = %validated.total,
            "receipt validated"
        );

        let outcome = self.engine.score(receipt).inspect_err(|err| {
            warn!(rule = err.rule.label(), error = %err, "unable to score receipt");
        })?;
        debug!(points = outcome.total, "receipt scored");
        Ok(outcome)
    }

    /// Points for a stored receipt, or `None` when the id is unknown.
    pub fn lookup(&self, id: &ReceiptId) -> Result<Option<i64>, ReceiptServiceError> {
        Ok(self.record(id)?.map(|record| record.points))
    }

    pub fn record(&self, id: &ReceiptId) -> Result<Option<ScoreRecord>, ReceiptServiceError> {
        Ok(self.store.get(id)?)
    }
}

/// Error raised by the receipt service, tagged with the stage that failed.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error("receipt validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("points calculation failed: {0}")]
    Calculation(#[from] CalculationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ReceiptServiceError {
    /// Whether the submitted receipt itself was at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ReceiptServiceError::Validation(_) | ReceiptServiceError::Calculation(_)
        )
    }
}
