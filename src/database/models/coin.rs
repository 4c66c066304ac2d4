use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::text_enum;

text_enum!(CoinEntryKind {
    Earned => "earned",
    Redeemed => "redeemed",
    Adjusted => "adjusted",
});

/// One append-only ledger entry. `amount` is signed; `balance_after` records
/// the balance the debit/credit left behind for audit purposes.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CoinTransaction {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(try_from = "String")]
    pub kind: CoinEntryKind,
    pub amount: i64,
    pub description: String,
    pub balance_after: i64,
    pub created_at: DateTime<Utc>,
}
