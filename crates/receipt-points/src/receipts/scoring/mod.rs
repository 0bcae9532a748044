mod rules;

use serde::{Deserialize, Serialize};

use super::domain::Receipt;
use super::validation::{ReceiptValidator, ValidationError};

/// Rule that contributed to (or blocked) a receipt's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsRule {
    RetailerName,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    ItemDescription,
    OddPurchaseDay,
    AfternoonPurchase,
}

impl PointsRule {
    pub fn label(self) -> &'static str {
        match self {
            PointsRule::RetailerName => "Retailer name",
            PointsRule::RoundDollarTotal => "Round dollar total",
            PointsRule::QuarterMultipleTotal => "Quarter multiple total",
            PointsRule::ItemPairs => "Item pairs",
            PointsRule::ItemDescription => "Item descriptions",
            PointsRule::OddPurchaseDay => "Odd purchase day",
            PointsRule::AfternoonPurchase => "Afternoon purchase",
        }
    }
}

/// Raised when a rule's input field does not pass validation. No partial score
/// is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unable to apply {} rule: {source}", .rule.label())]
pub struct CalculationError {
    pub rule: PointsRule,
    #[source]
    pub source: ValidationError,
}

/// Points earned from a single rule, kept for audit output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub rule: PointsRule,
    pub points: i64,
    pub notes: String,
}

/// Total score and the rule-by-rule breakdown that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub total: i64,
    pub components: Vec<ScoreComponent>,
}

/// Stateless engine applying the fixed points rules to a receipt.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointsEngine {
    validator: ReceiptValidator,
}

impl PointsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score a receipt. Each rule re-checks the fields it reads, so calling this
    /// without validating first fails exactly as validation would.
    pub fn score(&self, receipt: &Receipt) -> Result<ScoreOutcome, CalculationError> {
        let components = rules::score_receipt(&self.validator, receipt)?;
        // Only the description bonus is unbounded, so an overflowing sum is
        // charged to it.
        let total = components
            .iter()
            .try_fold(0i64, |sum, component| sum.checked_add(component.points))
            .ok_or(CalculationError {
                rule: PointsRule::ItemDescription,
                source: ValidationError::ItemPointsOverflow,
            })?;
        Ok(ScoreOutcome { total, components })
    }
}
