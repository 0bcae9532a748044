use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use super::domain::{Amount, Item, Receipt};

const RETAILER_PATTERN: &str = r"^[A-Za-z0-9\s&-]+$";
const AMOUNT_PATTERN: &str = r"^([0-9]+)\.([0-9]{2})$";
const DATE_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";
const TIME_PATTERN: &str = r"^[0-9]{2}:[0-9]{2}$";

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static receipt pattern compiles"))
}

fn retailer_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compiled(&CELL, RETAILER_PATTERN)
}

fn amount_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compiled(&CELL, AMOUNT_PATTERN)
}

fn date_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compiled(&CELL, DATE_PATTERN)
}

fn time_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compiled(&CELL, TIME_PATTERN)
}

/// Receipt field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptField {
    Retailer,
    PurchaseDate,
    PurchaseTime,
    Items,
    Total,
}

impl ReceiptField {
    pub fn label(self) -> &'static str {
        match self {
            ReceiptField::Retailer => "retailer",
            ReceiptField::PurchaseDate => "purchaseDate",
            ReceiptField::PurchaseTime => "purchaseTime",
            ReceiptField::Items => "items",
            ReceiptField::Total => "total",
        }
    }
}

/// Format violations found while checking a receipt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("retailer '{value}' may only contain letters, digits, whitespace, '&' and '-'")]
    InvalidRetailer { value: String },
    #[error("purchase date '{value}' is not a YYYY-MM-DD calendar date")]
    InvalidPurchaseDate { value: String },
    #[error("purchase time '{value}' is not a 24-hour HH:MM time")]
    InvalidPurchaseTime { value: String },
    #[error("receipt has no items")]
    MissingItems,
    #[error("item {index} has an empty description")]
    EmptyItemDescription { index: usize },
    /// Also raised for prices above `u128::MAX` cents.
    #[error("item {index} price '{value}' is not a non-negative amount with two decimals")]
    InvalidItemPrice { index: usize, value: String },
    /// Also raised for totals above `u128::MAX` cents.
    #[error("total '{value}' is not a non-negative amount with two decimals")]
    InvalidTotal { value: String },
    #[error("item prices are too large to score")]
    ItemPointsOverflow,
}

impl ValidationError {
    pub fn field(&self) -> ReceiptField {
        match self {
            ValidationError::InvalidRetailer { .. } => ReceiptField::Retailer,
            ValidationError::InvalidPurchaseDate { .. } => ReceiptField::PurchaseDate,
            ValidationError::InvalidPurchaseTime { .. } => ReceiptField::PurchaseTime,
            ValidationError::MissingItems
            | ValidationError::EmptyItemDescription { .. }
            | ValidationError::InvalidItemPrice { .. }
            | ValidationError::ItemPointsOverflow => ReceiptField::Items,
            ValidationError::InvalidTotal { .. } => ReceiptField::Total,
        }
    }
}

/// Item with its description trimmed and price converted to cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedItem {
    pub description: String,
    pub price: Amount,
}

/// Receipt whose fields have all been parsed into typed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedReceipt {
    pub retailer: String,
    pub purchase_date: NaiveDate,
    pub purchase_time: NaiveTime,
    pub items: Vec<ValidatedItem>,
    pub total: Amount,
}

/// Parse `DOLLARS.CC` into cents. `None` for anything else, including values
/// too large for a `u128` cent count.
pub fn parse_amount(raw: &str) -> Option<Amount> {
    let captures = amount_regex().captures(raw)?;
    let dollars: u128 = captures.get(1)?.as_str().parse().ok()?;
    let cents: u128 = captures.get(2)?.as_str().parse().ok()?;
    dollars
        .checked_mul(100)
        .and_then(|value| value.checked_add(cents))
        .map(Amount::from_cents)
}

/// Structural checks applied to a receipt before it is scored.
///
/// The per-field methods are shared with the scoring rules so both stages agree
/// on what a well-formed field is.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReceiptValidator;

impl ReceiptValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check fields in order (retailer, date, time, items, total) and stop at the
    /// first failure.
    pub fn validate(&self, receipt: &Receipt) -> Result<ValidatedReceipt, ValidationError> {
        let retailer = self.retailer(&receipt.retailer)?.to_string();
        let purchase_date = self.purchase_date(&receipt.purchase_date)?;
        let purchase_time = self.purchase_time(&receipt.purchase_time)?;
        let items = self.items(&receipt.items)?;
        let total = self.total(&receipt.total)?;

        Ok(ValidatedReceipt {
            retailer,
            purchase_date,
            purchase_time,
            items,
            total,
        })
    }

    /// A whitespace-only name passes; it simply earns nothing.
    pub fn retailer<'a>(&self, retailer: &'a str) -> Result<&'a str, ValidationError> {
        if retailer_regex().is_match(retailer) {
            Ok(retailer)
        } else {
            Err(ValidationError::InvalidRetailer {
                value: retailer.to_string(),
            })
        }
    }

    pub fn purchase_date(&self, raw: &str) -> Result<NaiveDate, ValidationError> {
        let invalid = || ValidationError::InvalidPurchaseDate {
            value: raw.to_string(),
        };
        if !date_regex().is_match(raw) {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())
    }

    pub fn purchase_time(&self, raw: &str) -> Result<NaiveTime, ValidationError> {
        let invalid = || ValidationError::InvalidPurchaseTime {
            value: raw.to_string(),
        };
        if !time_regex().is_match(raw) {
            return Err(invalid());
        }
        NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| invalid())
    }

    pub fn items(&self, items: &[Item]) -> Result<Vec<ValidatedItem>, ValidationError> {
        if items.is_empty() {
            return Err(ValidationError::MissingItems);
        }

        items
            .iter()
            .enumerate()
            .map(|(index, item)| self.item(index, item))
            .collect()
    }

    pub fn item(&self, index: usize, item: &Item) -> Result<ValidatedItem, ValidationError> {
        let description = item.short_description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyItemDescription { index });
        }

        let price =
            parse_amount(&item.price).ok_or_else(|| ValidationError::InvalidItemPrice {
                index,
                value: item.price.clone(),
            })?;

        Ok(ValidatedItem {
            description: description.to_string(),
            price,
        })
    }

    pub fn total(&self, raw: &str) -> Result<Amount, ValidationError> {
        parse_amount(raw).ok_or_else(|| ValidationError::InvalidTotal {
            value: raw.to_string(),
        })
    }
}
