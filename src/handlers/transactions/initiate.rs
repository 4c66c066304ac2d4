use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::database::models::item::{Item, ItemStatus};
use crate::database::models::transaction::{Transaction, TransactionKind};
use crate::error::ApiError;
use crate::handlers::dashboard::parse_uuid;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuyRequest {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRequest {
    pub offer_amount: i64,
    #[serde(default)]
    pub message: Option<String>,
}

async fn load_item_for_purchase(
    state: &AppState,
    raw_id: &str,
    buyer: &AuthUser,
    own_item_message: &str,
) -> Result<Item, ApiError> {
    let id = parse_uuid(raw_id, "item")?;

    let item = sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Item not found"))?;

    if item.user_id == buyer.id {
        return Err(ApiError::bad_request(own_item_message));
    }
    Ok(item)
}

/// POST /api/dashboard/items/:id/buy - direct purchase at the listed points
pub async fn buy_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    payload: Option<Json<BuyRequest>>,
) -> Result<Response, ApiError> {
    let message = payload
        .map(|Json(p)| p.message.unwrap_or_default())
        .unwrap_or_default();

    let item =
        load_item_for_purchase(&state, &id, &auth, "You cannot buy your own item").await?;

    let mut tx = state.pool.begin().await?;
    let transaction = sqlx::query_as::<_, Transaction>(
        "INSERT INTO transactions (item_id, buyer_id, seller_id, offer_amount, kind, message)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(item.id)
    .bind(auth.id)
    .bind(item.user_id)
    .bind(item.points)
    .bind(TransactionKind::Buy.as_str())
    .bind(&message)
    .fetch_one(&mut *tx)
    .await?;

    // The item leaves the browsable pool while the seller decides
    sqlx::query("UPDATE items SET status = $1, updated_at = now() WHERE id = $2")
        .bind(ItemStatus::Pending.as_str())
        .bind(item.id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(Json(json!({
        "success": true,
        "message": "Purchase request sent to seller",
        "data": { "transaction": transaction },
    }))
    .into_response())
}

/// POST /api/dashboard/items/:id/offer - negotiate a different amount
pub async fn offer_on_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<OfferRequest>,
) -> Result<Response, ApiError> {
    if payload.offer_amount <= 0 {
        return Err(ApiError::bad_request("Valid offer amount is required"));
    }

    let item =
        load_item_for_purchase(&state, &id, &auth, "You cannot offer on your own item").await?;

    let transaction = sqlx::query_as::<_, Transaction>(
        "INSERT INTO transactions (item_id, buyer_id, seller_id, offer_amount, kind, message)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(item.id)
    .bind(auth.id)
    .bind(item.user_id)
    .bind(payload.offer_amount)
    .bind(TransactionKind::Offer.as_str())
    .bind(payload.message.unwrap_or_default())
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Offer sent to seller",
        "data": { "transaction": transaction },
    }))
    .into_response())
}
