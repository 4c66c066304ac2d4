mod browse;
mod create;
mod mine;
mod overview;
mod show;
mod update;

pub use browse::browse_items;
pub use create::create_item;
pub use mine::{bought_items, listed_items};
pub use overview::overview;
pub use show::get_item;
pub use update::update_item;

use serde_json::{json, Value};

/// Offset pagination block shared by the listing endpoints.
pub(crate) fn pagination_block(page: i64, limit: i64, total_items: i64) -> Value {
    let total_pages = if total_items == 0 {
        0
    } else {
        (total_items + limit - 1) / limit
    };
    json!({
        "currentPage": page,
        "totalPages": total_pages,
        "totalItems": total_items,
        "hasNextPage": page < total_pages,
        "hasPrevPage": page > 1,
    })
}

pub(crate) fn parse_uuid(raw: &str, what: &str) -> Result<uuid::Uuid, crate::error::ApiError> {
    uuid::Uuid::parse_str(raw)
        .map_err(|_| crate::error::ApiError::bad_request(format!("Invalid {} id", what)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_math() {
        let block = pagination_block(2, 12, 25);
        assert_eq!(block["totalPages"], 3);
        assert_eq!(block["hasNextPage"], true);
        assert_eq!(block["hasPrevPage"], true);

        let block = pagination_block(1, 12, 0);
        assert_eq!(block["totalPages"], 0);
        assert_eq!(block["hasNextPage"], false);
        assert_eq!(block["hasPrevPage"], false);

        let block = pagination_block(3, 12, 36);
        assert_eq!(block["totalPages"], 3);
        assert_eq!(block["hasNextPage"], false);
    }
}
