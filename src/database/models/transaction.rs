use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::item::ItemStatus;
use super::text_enum;

text_enum!(TransactionKind {
    Buy => "buy",
    Offer => "offer",
});

text_enum!(TransactionStatus {
    Pending => "pending",
    Accepted => "accepted",
    Rejected => "rejected",
    Completed => "completed",
});

/// Seller's verdict on a pending transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RespondAction {
    Accept,
    Reject,
}

impl RespondAction {
    /// Item status resulting from this verdict: an accepted sale removes the
    /// item from circulation, a rejection returns it to the browsable pool.
    pub fn resulting_item_status(self) -> ItemStatus {
        match self {
            RespondAction::Accept => ItemStatus::Swapped,
            RespondAction::Reject => ItemStatus::Approved,
        }
    }
}

/// The only legal transitions: pending resolves exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyResolved(pub TransactionStatus);

impl TransactionStatus {
    pub fn respond(self, action: RespondAction) -> Result<TransactionStatus, AlreadyResolved> {
        match (self, action) {
            (TransactionStatus::Pending, RespondAction::Accept) => Ok(TransactionStatus::Accepted),
            (TransactionStatus::Pending, RespondAction::Reject) => Ok(TransactionStatus::Rejected),
            (resolved, _) => Err(AlreadyResolved(resolved)),
        }
    }
}

/// A buyer-initiated buy/offer record against an item.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub item_id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub offer_amount: i64,
    #[sqlx(try_from = "String")]
    pub kind: TransactionKind,
    #[sqlx(try_from = "String")]
    pub status: TransactionStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of a transaction listing, with the item and the counterparty
/// (buyer for the seller view, seller for the buyer view) joined in.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub id: Uuid,
    pub offer_amount: i64,
    #[sqlx(try_from = "String")]
    pub kind: TransactionKind,
    #[sqlx(try_from = "String")]
    pub status: TransactionStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub item_id: Uuid,
    pub item_title: String,
    pub item_images: Vec<String>,
    pub item_points: i64,
    #[sqlx(try_from = "String")]
    pub item_status: ItemStatus,
    pub counterparty_id: Uuid,
    pub counterparty_name: String,
    pub counterparty_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_accepts_once() {
        let next = TransactionStatus::Pending
            .respond(RespondAction::Accept)
            .unwrap();
        assert_eq!(next, TransactionStatus::Accepted);
        assert_eq!(
            next.respond(RespondAction::Accept),
            Err(AlreadyResolved(TransactionStatus::Accepted))
        );
    }

    #[test]
    fn pending_rejects_once() {
        let next = TransactionStatus::Pending
            .respond(RespondAction::Reject)
            .unwrap();
        assert_eq!(next, TransactionStatus::Rejected);
        assert_eq!(
            next.respond(RespondAction::Accept),
            Err(AlreadyResolved(TransactionStatus::Rejected))
        );
    }

    #[test]
    fn completed_never_transitions() {
        assert!(TransactionStatus::Completed
            .respond(RespondAction::Reject)
            .is_err());
    }

    #[test]
    fn verdict_drives_item_status() {
        assert_eq!(
            RespondAction::Accept.resulting_item_status(),
            ItemStatus::Swapped
        );
        assert_eq!(
            RespondAction::Reject.resulting_item_status(),
            ItemStatus::Approved
        );
    }

    #[test]
    fn action_parses_from_wire() {
        let action: RespondAction = serde_json::from_value(serde_json::json!("accept")).unwrap();
        assert_eq!(action, RespondAction::Accept);
        assert!(serde_json::from_value::<RespondAction>(serde_json::json!("cancel")).is_err());
    }
}
