use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::item::Item;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::pagination_block;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    fn resolve(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).clamp(1, 100_000);
        let limit = self.limit.unwrap_or(10).clamp(1, 50);
        (page, limit, (page - 1) * limit)
    }
}

/// GET /api/dashboard/user/listed - the caller's own listings
pub async fn listed_items(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<Value> {
    let (page, limit, offset) = query.resolve();

    let items = sqlx::query_as::<_, Item>(
        "SELECT * FROM items WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
    )
    .bind(auth.id)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let total_items =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM items WHERE user_id = $1")
            .bind(auth.id)
            .fetch_one(&state.pool)
            .await?;

    Ok(ApiResponse::success(json!({
        "items": items,
        "pagination": pagination_block(page, limit, total_items),
    })))
}

/// GET /api/dashboard/user/bought - items won through accepted transactions
pub async fn bought_items(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<Value> {
    let (page, limit, offset) = query.resolve();

    let items = sqlx::query_as::<_, Item>(
        "SELECT i.* FROM items i
         JOIN transactions t ON t.item_id = i.id
         WHERE t.buyer_id = $1 AND t.status = 'accepted'
         ORDER BY t.updated_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(auth.id)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let total_items = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM transactions WHERE buyer_id = $1 AND status = 'accepted'",
    )
    .bind(auth.id)
    .fetch_one(&state.pool)
    .await?;

    Ok(ApiResponse::success(json!({
        "items": items,
        "pagination": pagination_block(page, limit, total_items),
    })))
}
