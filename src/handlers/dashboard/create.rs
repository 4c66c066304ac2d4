use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::item::{Item, ItemCondition, ItemStatus};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub title: String,
    pub description: String,
    pub size: String,
    pub color: Option<String>,
    pub brand: Option<String>,
    pub points: i64,
    pub category: String,
    pub condition: String,
    #[serde(default)]
    pub images: Vec<String>,
}

pub(crate) fn validate_image_urls(images: &[String]) -> Result<(), ApiError> {
    if images.is_empty() || images[0].trim().is_empty() {
        return Err(ApiError::bad_request(
            "At least one image URL is required.",
        ));
    }
    for image in images {
        let parsed = url::Url::parse(image)
            .map_err(|_| ApiError::bad_request(format!("Invalid image URL: {}", image)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ApiError::bad_request(format!(
                "Invalid image URL: {}",
                image
            )));
        }
    }
    Ok(())
}

pub fn validate_new_item(payload: &CreateItemRequest) -> Result<ItemCondition, ApiError> {
    for (field, value) in [
        ("title", &payload.title),
        ("description", &payload.description),
        ("size", &payload.size),
        ("category", &payload.category),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::bad_request(format!(
                "Missing required field: {}",
                field
            )));
        }
    }
    if payload.points <= 0 {
        return Err(ApiError::bad_request("Points must be a positive number."));
    }
    let condition: ItemCondition = payload
        .condition
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid condition."))?;
    validate_image_urls(&payload.images)?;
    Ok(condition)
}

/// POST /api/dashboard/items - list an item; starts out pending approval
pub async fn create_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateItemRequest>,
) -> ApiResult<Value> {
    let condition = validate_new_item(&payload)?;

    let item = sqlx::query_as::<_, Item>(
        "INSERT INTO items (title, description, size, color, brand, points, status, images, category, condition, user_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
         RETURNING *",
    )
    .bind(payload.title.trim())
    .bind(payload.description.trim())
    .bind(payload.size.trim())
    .bind(payload.color.as_deref().map(str::trim))
    .bind(payload.brand.as_deref().map(str::trim))
    .bind(payload.points)
    .bind(ItemStatus::Pending.as_str())
    .bind(&payload.images)
    .bind(payload.category.trim())
    .bind(condition.as_str())
    .bind(auth.id)
    .fetch_one(&state.pool)
    .await?;

    Ok(ApiResponse::created(json!({ "item": item })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateItemRequest {
        CreateItemRequest {
            title: "Vintage Denim Jacket".to_string(),
            description: "Classic blue denim jacket with a vintage wash.".to_string(),
            size: "M".to_string(),
            color: Some("Blue".to_string()),
            brand: Some("Levi's".to_string()),
            points: 120,
            category: "Outerwear".to_string(),
            condition: "Like New".to_string(),
            images: vec!["https://images.example.com/jacket.jpg".to_string()],
        }
    }

    #[test]
    fn accepts_complete_listing() {
        assert_eq!(validate_new_item(&request()).unwrap(), ItemCondition::LikeNew);
    }

    #[test]
    fn rejects_missing_required_fields() {
        for blank in ["title", "description", "size", "category"] {
            let mut payload = request();
            match blank {
                "title" => payload.title = "  ".to_string(),
                "description" => payload.description = String::new(),
                "size" => payload.size = String::new(),
                _ => payload.category = String::new(),
            }
            assert!(validate_new_item(&payload).is_err(), "{} should be required", blank);
        }
    }

    #[test]
    fn rejects_non_positive_points() {
        let mut payload = request();
        payload.points = 0;
        assert!(validate_new_item(&payload).is_err());
        payload.points = -5;
        assert!(validate_new_item(&payload).is_err());
    }

    #[test]
    fn rejects_unknown_condition() {
        let mut payload = request();
        payload.condition = "Threadbare".to_string();
        assert!(validate_new_item(&payload).is_err());
    }

    #[test]
    fn rejects_missing_or_malformed_images() {
        let mut payload = request();
        payload.images = vec![];
        assert!(validate_new_item(&payload).is_err());

        payload.images = vec!["".to_string()];
        assert!(validate_new_item(&payload).is_err());

        payload.images = vec!["not a url".to_string()];
        assert!(validate_new_item(&payload).is_err());

        payload.images = vec!["ftp://example.com/x.jpg".to_string()];
        assert!(validate_new_item(&payload).is_err());
    }
}
