use axum::extract::State;
use serde_json::{json, Value};

use crate::config;
use crate::database::models::coin::CoinTransaction;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/coins/transactions - latest ledger entries, newest first
pub async fn coin_history(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Value> {
    let transactions = sqlx::query_as::<_, CoinTransaction>(
        "SELECT * FROM coin_transactions WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(auth.id)
    .bind(config::config().rewards.ledger_page_size)
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success(json!({ "transactions": transactions })))
}
