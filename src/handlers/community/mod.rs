use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::thought::CommunityThought;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

const FEED_LIMIT: i64 = 50;
const MAX_THOUGHT_LEN: usize = 500;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostThoughtRequest {
    pub text: String,
}

pub(crate) fn validate_thought(text: &str) -> Result<&str, ApiError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ApiError::bad_request("Text is required"));
    }
    if text.chars().count() > MAX_THOUGHT_LEN {
        return Err(ApiError::bad_request(format!(
            "Text must be at most {} characters",
            MAX_THOUGHT_LEN
        )));
    }
    Ok(text)
}

/// GET /api/community/thoughts - latest posts, newest first
pub async fn list_thoughts(State(state): State<AppState>) -> ApiResult<Value> {
    let thoughts = sqlx::query_as::<_, CommunityThought>(
        "SELECT * FROM community_thoughts ORDER BY created_at DESC LIMIT $1",
    )
    .bind(FEED_LIMIT)
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success(json!({ "thoughts": thoughts })))
}

/// POST /api/community/thoughts - append a post under the caller's name
pub async fn post_thought(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<PostThoughtRequest>,
) -> ApiResult<Value> {
    let text = validate_thought(&payload.text)?;

    let author = sqlx::query_scalar::<_, String>("SELECT name FROM users WHERE id = $1")
        .bind(auth.id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let thought = sqlx::query_as::<_, CommunityThought>(
        "INSERT INTO community_thoughts (author, body) VALUES ($1, $2) RETURNING *",
    )
    .bind(&author)
    .bind(text)
    .fetch_one(&state.pool)
    .await?;

    Ok(ApiResponse::created(json!({ "thought": thought })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_thought_is_rejected() {
        assert!(validate_thought("   ").is_err());
    }

    #[test]
    fn oversized_thought_is_rejected() {
        let text = "x".repeat(MAX_THOUGHT_LEN + 1);
        assert!(validate_thought(&text).is_err());
    }

    #[test]
    fn thought_is_trimmed() {
        assert_eq!(validate_thought("  hello  ").unwrap(), "hello");
    }
}
