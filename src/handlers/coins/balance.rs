use axum::extract::State;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/coins/balance
pub async fn coin_balance(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Value> {
    let balance = sqlx::query_scalar::<_, i64>("SELECT coin_balance FROM users WHERE id = $1")
        .bind(auth.id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(json!({ "coinBalance": balance })))
}
