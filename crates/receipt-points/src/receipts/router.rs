use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{error, warn};

use super::domain::{Receipt, ReceiptId};
use super::service::ReceiptPointsService;
use super::store::ReceiptStore;
use crate::error::AppError;

/// Router exposing receipt submission and points lookup.
pub fn receipt_router<S>(service: Arc<ReceiptPointsService<S>>) -> Router
where
    S: ReceiptStore + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_handler::<S>))
        .route("/receipts/:id/points", get(points_handler::<S>))
        .with_state(service)
}

pub(crate) async fn process_handler<S>(
    State(service): State<Arc<ReceiptPointsService<S>>>,
    payload: Result<Json<Receipt>, JsonRejection>,
) -> Result<Json<Value>, AppError>
where
    S: ReceiptStore + 'static,
{
    let Json(receipt) = payload.inspect_err(|rejection| {
        warn!(error = %rejection.body_text(), "unreadable receipt payload");
    })?;

    let id = service.submit(receipt).inspect_err(|err| {
        if !err.is_client_error() {
            error!(error = %err, "failed to store receipt");
        }
    })?;
    Ok(Json(json!({ "id": id })))
}

pub(crate) async fn points_handler<S>(
    State(service): State<Arc<ReceiptPointsService<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError>
where
    S: ReceiptStore + 'static,
{
    let id = ReceiptId(id);
    let points = service
        .lookup(&id)
        .inspect_err(|err| {
            error!(receipt_id = %id, error = %err, "failed to read receipt store");
        })?
        .ok_or(AppError::NotFound(id))?;
    Ok(Json(json!({ "points": points })))
}
