use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::database::models::item::Item;
use crate::database::repository::Repository;
use crate::error::ApiError;
use crate::filter::FilterData;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::pagination_block;

pub const DEFAULT_PAGE_SIZE: i64 = 12;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowseQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub condition: Option<String>,
    pub min_points: Option<i64>,
    pub max_points: Option<i64>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Sortable columns; anything else is a 400, never interpolated into SQL.
fn map_sort_column(raw: &str) -> Option<&'static str> {
    match raw {
        "createdAt" | "created_at" => Some("created_at"),
        "updatedAt" | "updated_at" => Some("updated_at"),
        "points" => Some("points"),
        "title" => Some("title"),
        _ => None,
    }
}

/// `%`/`_` are LIKE metacharacters; a search for "100%_wool" must match
/// literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Translate browse query params into a structured filter.
pub fn build_browse_filter(query: &BrowseQuery) -> Result<(FilterData, i64, i64), ApiError> {
    let page = query.page.unwrap_or(1).clamp(1, 100_000);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);
    let offset = (page - 1) * limit;

    let mut where_map = Map::new();
    if let Some(category) = query.category.as_deref().filter(|s| !s.is_empty()) {
        where_map.insert("category".to_string(), json!(category));
    }
    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
        where_map.insert("status".to_string(), json!(status));
    }
    if let Some(condition) = query.condition.as_deref().filter(|s| !s.is_empty()) {
        where_map.insert("condition".to_string(), json!(condition));
    }

    let mut points = Map::new();
    if let Some(min) = query.min_points {
        points.insert("$gte".to_string(), json!(min));
    }
    if let Some(max) = query.max_points {
        points.insert("$lte".to_string(), json!(max));
    }
    if !points.is_empty() {
        where_map.insert("points".to_string(), Value::Object(points));
    }

    if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", escape_like(search.trim()));
        where_map.insert(
            "$or".to_string(),
            json!([
                { "title": { "$ilike": pattern } },
                { "description": { "$ilike": pattern } },
                { "brand": { "$ilike": pattern } },
            ]),
        );
    }

    let sort_column = match query.sort_by.as_deref() {
        Some(raw) => map_sort_column(raw)
            .ok_or_else(|| ApiError::bad_request(format!("Invalid sortBy field: {}", raw)))?,
        None => "created_at",
    };
    let sort_direction = match query.sort_order.as_deref() {
        Some("asc") => "asc",
        _ => "desc",
    };

    let filter = FilterData {
        select: None,
        where_clause: if where_map.is_empty() {
            None
        } else {
            Some(Value::Object(where_map))
        },
        order: Some(json!({ sort_column: sort_direction })),
        limit: Some(limit as i32),
        offset: Some(offset as i32),
    };

    Ok((filter, page, limit))
}

/// GET /api/dashboard/items - public browse with filters and pagination
pub async fn browse_items(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> ApiResult<Value> {
    let (filter, page, limit) = build_browse_filter(&query)?;

    let count_filter = FilterData {
        where_clause: filter.where_clause.clone(),
        ..Default::default()
    };

    let repository = Repository::<Item>::new("items", state.pool.clone());
    let items = repository.select_any(filter).await?;
    let total_items = repository.count(count_filter).await?;

    // Distinct values feed the client's filter dropdowns
    let categories =
        sqlx::query_scalar::<_, String>("SELECT DISTINCT category FROM items ORDER BY category")
            .fetch_all(&state.pool)
            .await?;
    let conditions =
        sqlx::query_scalar::<_, String>("SELECT DISTINCT condition FROM items ORDER BY condition")
            .fetch_all(&state.pool)
            .await?;

    Ok(ApiResponse::success(json!({
        "items": items,
        "pagination": pagination_block(page, limit, total_items),
        "filters": {
            "categories": categories,
            "conditions": conditions,
        },
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_newest_first() {
        let (filter, page, limit) = build_browse_filter(&BrowseQuery::default()).unwrap();
        assert_eq!(page, 1);
        assert_eq!(limit, DEFAULT_PAGE_SIZE);
        assert!(filter.where_clause.is_none());
        assert_eq!(filter.order, Some(json!({ "created_at": "desc" })));
        assert_eq!(filter.offset, Some(0));
    }

    #[test]
    fn combines_category_points_and_search() {
        let query = BrowseQuery {
            category: Some("Outerwear".to_string()),
            min_points: Some(50),
            max_points: Some(150),
            search: Some("denim".to_string()),
            ..Default::default()
        };
        let (filter, _, _) = build_browse_filter(&query).unwrap();
        let where_clause = filter.where_clause.unwrap();
        assert_eq!(where_clause["category"], json!("Outerwear"));
        assert_eq!(where_clause["points"]["$gte"], json!(50));
        assert_eq!(where_clause["points"]["$lte"], json!(150));
        let or = where_clause["$or"].as_array().unwrap();
        assert_eq!(or.len(), 3);
        assert_eq!(or[0]["title"]["$ilike"], json!("%denim%"));
    }

    #[test]
    fn search_escapes_like_metacharacters() {
        let query = BrowseQuery {
            search: Some("100%_wool".to_string()),
            ..Default::default()
        };
        let (filter, _, _) = build_browse_filter(&query).unwrap();
        let or = filter.where_clause.unwrap()["$or"].as_array().unwrap().to_vec();
        assert_eq!(or[0]["title"]["$ilike"], json!("%100\\%\\_wool%"));
    }

    #[test]
    fn camel_case_sort_maps_to_column() {
        let query = BrowseQuery {
            sort_by: Some("createdAt".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        };
        let (filter, _, _) = build_browse_filter(&query).unwrap();
        assert_eq!(filter.order, Some(json!({ "created_at": "asc" })));
    }

    #[test]
    fn unknown_sort_column_is_rejected() {
        let query = BrowseQuery {
            sort_by: Some("password_hash".to_string()),
            ..Default::default()
        };
        assert!(build_browse_filter(&query).is_err());
    }

    #[test]
    fn page_drives_offset() {
        let query = BrowseQuery {
            page: Some(3),
            limit: Some(10),
            ..Default::default()
        };
        let (filter, page, limit) = build_browse_filter(&query).unwrap();
        assert_eq!((page, limit), (3, 10));
        assert_eq!(filter.offset, Some(20));
    }
}
