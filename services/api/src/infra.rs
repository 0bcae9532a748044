use metrics_exporter_prometheus::PrometheusHandle;
use receipt_points::error::AppError;
use receipt_points::receipts::{InMemoryReceiptStore, Receipt, ReceiptPointsService};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type PointsService = ReceiptPointsService<InMemoryReceiptStore>;

/// One store per process, owned by the service handed to the router.
pub(crate) fn in_memory_service() -> Arc<PointsService> {
    let store = Arc::new(InMemoryReceiptStore::new());
    Arc::new(ReceiptPointsService::new(store))
}

pub(crate) fn load_receipt(path: &Path) -> Result<Receipt, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let receipt = serde_json::from_str(&raw)?;
    Ok(receipt)
}
