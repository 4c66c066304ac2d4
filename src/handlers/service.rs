use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::manager;
use crate::state::AppState;

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "ReWear API",
            "version": version,
            "description": "REST backend for the ReWear second-hand clothing marketplace",
            "endpoints": {
                "health": "/api/health (public)",
                "auth": "/api/auth/* (signup, login, verify-email, resend-otp, forgot-password, reset-password public; profile, logout bearer)",
                "items": "/api/dashboard/items[/:id] (browse public; create/update/buy/offer bearer)",
                "transactions": "/api/dashboard/seller|buyer/transactions, /api/dashboard/transactions/:id/respond (bearer)",
                "coins": "/api/coins/* (bearer)",
                "community": "/api/community/thoughts (list public; post bearer)",
            }
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match manager::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Route not found"
        })),
    )
}
