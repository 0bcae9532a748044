use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::receipts::domain::{Item, Receipt, ReceiptId};
use crate::receipts::scoring::ScoreOutcome;
use crate::receipts::store::{
    InMemoryReceiptStore, PutOutcome, ReceiptStore, RepositoryError, ScoreRecord,
};
use crate::receipts::{receipt_router, ReceiptPointsService};

/// Receipt from the published example, worth 28 points.
pub(super) fn target_receipt() -> Receipt {
    Receipt {
        id: String::new(),
        retailer: "Target".to_string(),
        purchase_date: "2022-01-01".to_string(),
        purchase_time: "13:01".to_string(),
        items: vec![
            Item::new("Mountain Dew 12PK", "6.49"),
            Item::new("Emils Cheese Pizza", "12.25"),
            Item::new("Knorr Creamy Chicken", "1.26"),
            Item::new("Doritos Nacho Cheese", "3.35"),
            Item::new("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
        ],
        total: "35.35".to_string(),
    }
}

/// Receipt from the published example, worth 109 points.
pub(super) fn corner_market_receipt() -> Receipt {
    Receipt {
        id: String::new(),
        retailer: "M&M Corner Market".to_string(),
        purchase_date: "2022-03-20".to_string(),
        purchase_time: "14:33".to_string(),
        items: vec![Item::new("Gatorade", "2.25"); 4],
        total: "9.00".to_string(),
    }
}

/// Single-item receipt with neutral fields, handy for isolating one rule.
pub(super) fn minimal_receipt() -> Receipt {
    Receipt {
        id: String::new(),
        retailer: "Shop".to_string(),
        purchase_date: "2022-01-02".to_string(),
        purchase_time: "09:15".to_string(),
        items: vec![Item::new("Milk", "1.37")],
        total: "1.37".to_string(),
    }
}

pub(super) fn build_service() -> (
    ReceiptPointsService<InMemoryReceiptStore>,
    Arc<InMemoryReceiptStore>,
) {
    let store = Arc::new(InMemoryReceiptStore::default());
    let service = ReceiptPointsService::new(store.clone());
    (service, store)
}

pub(super) fn router_with_store() -> (axum::Router, Arc<InMemoryReceiptStore>) {
    let (service, store) = build_service();
    (receipt_router(Arc::new(service)), store)
}

pub(super) struct UnavailableStore;

impl ReceiptStore for UnavailableStore {
    fn put(
        &self,
        _receipt: Receipt,
        _outcome: ScoreOutcome,
    ) -> Result<PutOutcome, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn get(&self, _id: &ReceiptId) -> Result<Option<ScoreRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn len(&self) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
