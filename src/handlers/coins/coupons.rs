use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config;
use crate::database::models::coupon::{catalog_option, RedemptionCoupon, COUPON_CATALOG};
use crate::error::ApiError;
use crate::handlers::dashboard::parse_uuid;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::debit_coins;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponIdRequest {
    pub coupon_id: String,
}

/// GET /api/coins/redemption-coupons - the caller's usable coupons
pub async fn my_coupons(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Value> {
    let coupons = sqlx::query_as::<_, RedemptionCoupon>(
        "SELECT * FROM redemption_coupons
         WHERE user_id = $1 AND is_active AND used_at IS NULL AND expires_at > now()
         ORDER BY created_at DESC",
    )
    .bind(auth.id)
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success(json!({ "coupons": coupons })))
}

/// GET /api/coins/available-coupons - catalog annotated with affordability
pub async fn available_coupons(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Value> {
    let balance = sqlx::query_scalar::<_, i64>("SELECT coin_balance FROM users WHERE id = $1")
        .bind(auth.id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let options: Vec<_> = COUPON_CATALOG
        .iter()
        .map(|option| {
            let mut value = serde_json::to_value(option).unwrap_or_default();
            value["canRedeem"] = json!(balance >= option.coins_required);
            value
        })
        .collect();

    Ok(ApiResponse::success(json!({
        "availableCoupons": options,
        "userCoinBalance": balance,
    })))
}

/// POST /api/coins/create-coupon - spend coins on a catalog option. Debit,
/// ledger entry, and coupon row commit together or not at all.
pub async fn create_coupon(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CouponIdRequest>,
) -> Result<Response, ApiError> {
    let option = catalog_option(&payload.coupon_id)
        .ok_or_else(|| ApiError::bad_request("Invalid coupon option"))?;

    let expires_at = Utc::now() + Duration::days(config::config().rewards.coupon_validity_days);

    let mut tx = state.pool.begin().await?;
    let balance = debit_coins(
        &mut tx,
        auth.id,
        option.coins_required,
        &format!("Created coupon: {}", option.title),
    )
    .await?
    .ok_or_else(|| ApiError::bad_request("Insufficient coins"))?;

    let coupon = sqlx::query_as::<_, RedemptionCoupon>(
        "INSERT INTO redemption_coupons
             (user_id, title, description, discount_type, discount_value,
              min_purchase_amount, coins_required, expires_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING *",
    )
    .bind(auth.id)
    .bind(option.title)
    .bind(option.description)
    .bind(option.discount_type.as_str())
    .bind(option.discount_value)
    .bind(option.min_purchase_amount)
    .bind(option.coins_required)
    .bind(expires_at)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(Json(json!({
        "success": true,
        "message": "Coupon created successfully",
        "data": {
            "coinBalance": balance,
            "coupon": coupon,
        },
    }))
    .into_response())
}

/// POST /api/coins/redeem-coupon - consume an owned coupon
pub async fn redeem_coupon(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CouponIdRequest>,
) -> Result<Response, ApiError> {
    let coupon_id = parse_uuid(&payload.coupon_id, "coupon")?;

    let mut tx = state.pool.begin().await?;

    let coupon = sqlx::query_as::<_, RedemptionCoupon>(
        "SELECT * FROM redemption_coupons WHERE id = $1 FOR UPDATE",
    )
    .bind(coupon_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::not_found("Coupon not found"))?;

    if coupon.user_id != auth.id {
        return Err(ApiError::forbidden("Not authorized"));
    }

    if !coupon.is_redeemable(Utc::now()) {
        return Err(ApiError::bad_request("Coupon is not valid"));
    }

    let balance = debit_coins(
        &mut tx,
        auth.id,
        coupon.coins_required,
        &format!("Redeemed coupon: {}", coupon.title),
    )
    .await?
    .ok_or_else(|| ApiError::bad_request("Insufficient coins"))?;

    let coupon = sqlx::query_as::<_, RedemptionCoupon>(
        "UPDATE redemption_coupons SET used_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(coupon.id)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(Json(json!({
        "success": true,
        "message": "Coupon redeemed successfully",
        "data": {
            "coinBalance": balance,
            "coupon": coupon,
        },
    }))
    .into_response())
}
