use axum::extract::State;
use serde_json::{json, Value};

use crate::database::models::item::Item;
use crate::database::repository::Repository;
use crate::error::ApiError;
use crate::filter::FilterData;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

async fn count_where(state: &AppState, sql: &str) -> Result<i64, ApiError> {
    let count = sqlx::query_scalar::<_, i64>(sql)
        .fetch_one(&state.pool)
        .await?;
    Ok(count)
}

/// GET /api/dashboard/overview - marketplace headline numbers
pub async fn overview(State(state): State<AppState>) -> ApiResult<Value> {
    let total_items = count_where(&state, "SELECT COUNT(*) FROM items").await?;
    let swaps_completed =
        count_where(&state, "SELECT COUNT(*) FROM items WHERE status = 'swapped'").await?;
    let items_awaiting =
        count_where(&state, "SELECT COUNT(*) FROM items WHERE status = 'pending'").await?;
    let flagged_items = count_where(&state, "SELECT COUNT(*) FROM items WHERE flagged").await?;

    let featured = Repository::<Item>::new("items", state.pool.clone())
        .select_any(FilterData {
            order: Some(json!({ "created_at": "desc" })),
            limit: Some(5),
            ..Default::default()
        })
        .await?;

    Ok(ApiResponse::success(json!({
        "totalItems": total_items,
        "swapsCompleted": swaps_completed,
        "itemsAwaiting": items_awaiting,
        "flaggedItems": flagged_items,
        "featuredItems": featured,
    })))
}
