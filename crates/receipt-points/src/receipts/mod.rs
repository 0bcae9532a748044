//! Receipt intake, points scoring and identifier-keyed lookup.

pub mod domain;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Amount, Item, Receipt, ReceiptId};
pub use router::receipt_router;
pub use scoring::{CalculationError, PointsEngine, PointsRule, ScoreComponent, ScoreOutcome};
pub use service::{ReceiptPointsService, ReceiptServiceError};
pub use store::{InMemoryReceiptStore, PutOutcome, ReceiptStore, RepositoryError, ScoreRecord};
pub use validation::{
    parse_amount, ReceiptField, ReceiptValidator, ValidatedItem, ValidatedReceipt,
    ValidationError,
};
