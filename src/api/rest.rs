use axum::{
    Router,
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use prometheus::Encoder;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::error::Error;
use crate::ledger::history::HistoryQuery;
use crate::ledger::service::LedgerService;
use crate::ledger::validator::PostingRequest;
use crate::observability::metrics::REGISTRY;
use crate::types::ids::TransactionId;
use crate::types::transaction::Transaction;

pub struct ApiState {
    pub ledger: RwLock<LedgerService>,
}

pub fn create_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/transactions", post(create_transaction).get(list_transactions))
        .route("/transactions/:id", get(get_transaction))
        .route("/accounts/:account_id/balance", get(get_account_balance))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::ValidationFailed(details) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": "Validation failed",
                    "details": details,
                })),
            )
                .into_response(),
            Error::TransactionNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "Transaction not found" })),
            )
                .into_response(),
            Error::ConfigError(message) => {
                tracing::error!("configuration error surfaced in a handler: {message}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

async fn health_check() -> &'static str {
    "OK"
}

async fn create_transaction(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<PostingRequest>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let mut ledger = state.ledger.write().await;
    let tx = ledger.create_transaction(req)?;
    Ok((StatusCode::CREATED, Json(tx)))
}

async fn get_transaction(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, Error> {
    // A path segment that is not a UUID cannot name a stored record, so it
    // maps to the same lookup miss as an unknown id.
    let id = TransactionId::from_string(&id).map_err(|_| Error::TransactionNotFound(id))?;
    let ledger = state.ledger.read().await;
    Ok(Json(ledger.get_transaction(id)?))
}

async fn list_transactions(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let ledger = state.ledger.read().await;
    Ok(Json(ledger.list_transactions(query)?))
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct BalanceResponse {
    account_id: String,
    balance: Decimal,
}

async fn get_account_balance(
    State(state): State<Arc<ApiState>>,
    Path(account_id): Path<String>,
) -> Json<BalanceResponse> {
    let ledger = state.ledger.read().await;
    let balance = ledger.account_balance(&account_id);
    Json(BalanceResponse { account_id, balance })
}

async fn metrics() -> Result<String, StatusCode> {
    let encoder = prometheus::TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&REGISTRY.gather(), &mut buffer)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    String::from_utf8(buffer).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
