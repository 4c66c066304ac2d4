use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::database::models::transaction::{RespondAction, Transaction};
use crate::error::ApiError;
use crate::handlers::dashboard::parse_uuid;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest {
    pub action: RespondAction,
}

/// PUT /api/dashboard/transactions/:id/respond - seller resolves a pending
/// transaction exactly once. Row lock + state machine close the
/// double-respond race; item and transaction move together or not at all.
pub async fn respond_to_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<RespondRequest>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&id, "transaction")?;

    let mut tx = state.pool.begin().await?;

    let transaction =
        sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::not_found("Transaction not found"))?;

    if transaction.seller_id != auth.id {
        return Err(ApiError::forbidden("Not authorized"));
    }

    let next_status = transaction
        .status
        .respond(payload.action)
        .map_err(|_| ApiError::bad_request("Transaction already processed"))?;

    let transaction = sqlx::query_as::<_, Transaction>(
        "UPDATE transactions SET status = $1, updated_at = now() WHERE id = $2 RETURNING *",
    )
    .bind(next_status.as_str())
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE items SET status = $1, updated_at = now() WHERE id = $2")
        .bind(payload.action.resulting_item_status().as_str())
        .bind(transaction.item_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    let verdict = match payload.action {
        RespondAction::Accept => "accepted",
        RespondAction::Reject => "rejected",
    };

    Ok(Json(json!({
        "success": true,
        "message": format!("Transaction {}", verdict),
        "data": { "transaction": transaction },
    }))
    .into_response())
}
