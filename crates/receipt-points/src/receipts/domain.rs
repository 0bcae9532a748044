use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier assigned to an accepted receipt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(pub String);

impl ReceiptId {
    /// Fresh random identifier.
    pub fn mint() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Line item as submitted. Price stays in its string form until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    pub short_description: String,
    pub price: String,
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            short_description: short_description.into(),
            price: price.into(),
        }
    }
}

/// Purchase receipt in wire form.
///
/// Every field defaults to empty so that a sparse payload reaches validation and
/// is rejected there with a field-specific error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Receipt {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    pub items: Vec<Item>,
    pub total: String,
}

impl Receipt {
    /// Field-wise comparison of everything the customer submitted. Items are
    /// compared by position and the store-assigned `id` is ignored.
    pub fn same_purchase(&self, other: &Receipt) -> bool {
        self.retailer == other.retailer
            && self.purchase_date == other.purchase_date
            && self.purchase_time == other.purchase_time
            && self.total == other.total
            && self.items == other.items
    }
}

/// Non-negative currency amount held as integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(u128);

impl Amount {
    pub const fn from_cents(cents: u128) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u128 {
        self.0
    }

    pub const fn is_whole_dollars(self) -> bool {
        self.0 % 100 == 0
    }

    pub const fn is_multiple_of(self, cents: u128) -> bool {
        self.0 % cents == 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
