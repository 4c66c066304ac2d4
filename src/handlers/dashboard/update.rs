use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::database::models::item::{Item, ItemCondition};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::create::validate_image_urls;
use super::parse_uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub brand: Option<String>,
    pub points: Option<i64>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub images: Option<Vec<String>>,
}

fn validate_update(payload: &UpdateItemRequest) -> Result<Option<ItemCondition>, ApiError> {
    for (field, value) in [
        ("title", &payload.title),
        ("description", &payload.description),
        ("size", &payload.size),
        ("category", &payload.category),
    ] {
        if matches!(value.as_deref().map(str::trim), Some("")) {
            return Err(ApiError::bad_request(format!(
                "Field cannot be empty: {}",
                field
            )));
        }
    }
    if matches!(payload.points, Some(points) if points <= 0) {
        return Err(ApiError::bad_request("Points must be a positive number."));
    }
    let condition = payload
        .condition
        .as_deref()
        .map(|raw| {
            raw.parse::<ItemCondition>()
                .map_err(|_| ApiError::bad_request("Invalid condition."))
        })
        .transpose()?;
    if let Some(images) = &payload.images {
        validate_image_urls(images)?;
    }
    Ok(condition)
}

/// PUT /api/dashboard/items/:id - owner-only listing edit
pub async fn update_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&id, "item")?;
    let condition = validate_update(&payload)?;

    let item = sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Item not found"))?;

    if item.user_id != auth.id {
        return Err(ApiError::forbidden("Not authorized"));
    }

    let item = sqlx::query_as::<_, Item>(
        "UPDATE items
         SET title = COALESCE($1, title),
             description = COALESCE($2, description),
             size = COALESCE($3, size),
             color = COALESCE($4, color),
             brand = COALESCE($5, brand),
             points = COALESCE($6, points),
             category = COALESCE($7, category),
             condition = COALESCE($8, condition),
             images = COALESCE($9, images),
             updated_at = now()
         WHERE id = $10
         RETURNING *",
    )
    .bind(payload.title.as_deref().map(str::trim))
    .bind(payload.description.as_deref().map(str::trim))
    .bind(payload.size.as_deref().map(str::trim))
    .bind(payload.color.as_deref().map(str::trim))
    .bind(payload.brand.as_deref().map(str::trim))
    .bind(payload.points)
    .bind(payload.category.as_deref().map(str::trim))
    .bind(condition.map(|c| c.as_str()))
    .bind(payload.images.as_deref())
    .bind(id)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Item updated successfully",
        "data": { "item": item },
    }))
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_is_allowed() {
        let payload = UpdateItemRequest {
            title: None,
            description: None,
            size: None,
            color: None,
            brand: None,
            points: None,
            category: None,
            condition: None,
            images: None,
        };
        assert!(validate_update(&payload).unwrap().is_none());
    }

    #[test]
    fn provided_fields_are_validated() {
        let mut payload = UpdateItemRequest {
            title: Some("  ".to_string()),
            description: None,
            size: None,
            color: None,
            brand: None,
            points: None,
            category: None,
            condition: None,
            images: None,
        };
        assert!(validate_update(&payload).is_err());

        payload.title = Some("Wool Coat".to_string());
        payload.points = Some(-1);
        assert!(validate_update(&payload).is_err());

        payload.points = Some(110);
        payload.condition = Some("Good".to_string());
        assert_eq!(validate_update(&payload).unwrap(), Some(ItemCondition::Good));
    }
}
