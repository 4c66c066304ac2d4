use axum::extract::State;
use serde_json::{json, Value};

use crate::database::models::transaction::TransactionSummary;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/dashboard/seller/transactions - pending decisions for the seller,
/// with the buyer as counterparty
pub async fn seller_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Value> {
    let transactions = sqlx::query_as::<_, TransactionSummary>(
        "SELECT t.id, t.offer_amount, t.kind, t.status, t.message, t.created_at,
                i.id AS item_id, i.title AS item_title, i.images AS item_images,
                i.points AS item_points, i.status AS item_status,
                u.id AS counterparty_id, u.name AS counterparty_name, u.email AS counterparty_email
         FROM transactions t
         JOIN items i ON i.id = t.item_id
         JOIN users u ON u.id = t.buyer_id
         WHERE t.seller_id = $1 AND t.status = 'pending'
         ORDER BY t.created_at DESC",
    )
    .bind(auth.id)
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success(json!({ "transactions": transactions })))
}

/// GET /api/dashboard/buyer/transactions - everything the buyer initiated,
/// with the seller as counterparty
pub async fn buyer_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Value> {
    let transactions = sqlx::query_as::<_, TransactionSummary>(
        "SELECT t.id, t.offer_amount, t.kind, t.status, t.message, t.created_at,
                i.id AS item_id, i.title AS item_title, i.images AS item_images,
                i.points AS item_points, i.status AS item_status,
                u.id AS counterparty_id, u.name AS counterparty_name, u.email AS counterparty_email
         FROM transactions t
         JOIN items i ON i.id = t.item_id
         JOIN users u ON u.id = t.seller_id
         WHERE t.buyer_id = $1
         ORDER BY t.created_at DESC",
    )
    .bind(auth.id)
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success(json!({ "transactions": transactions })))
}
