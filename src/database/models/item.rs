use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::text_enum;

text_enum!(ItemStatus {
    Pending => "pending",
    Approved => "approved",
    Swapped => "swapped",
});

text_enum!(ItemCondition {
    New => "New",
    LikeNew => "Like New",
    Good => "Good",
    Fair => "Fair",
});

/// A single second-hand clothing listing.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub size: String,
    pub color: Option<String>,
    pub brand: Option<String>,
    pub points: i64,
    #[sqlx(try_from = "String")]
    pub status: ItemStatus,
    pub flagged: bool,
    pub images: Vec<String>,
    pub category: String,
    #[sqlx(try_from = "String")]
    pub condition: ItemCondition,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_round_trips_spaced_labels() {
        assert_eq!(
            "Like New".parse::<ItemCondition>().unwrap(),
            ItemCondition::LikeNew
        );
        assert_eq!(ItemCondition::LikeNew.as_str(), "Like New");
        assert!("Worn Out".parse::<ItemCondition>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(ItemStatus::Swapped).unwrap(),
            serde_json::json!("swapped")
        );
    }
}
