use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::text_enum;

text_enum!(DiscountType {
    Percentage => "percentage",
    Fixed => "fixed",
});

/// A coupon minted by spending coins. Consumed at most once.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionCoupon {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_purchase_amount: i64,
    pub coins_required: i64,
    pub is_active: bool,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl RedemptionCoupon {
    /// Usable: never consumed, still active, not past expiry.
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        self.used_at.is_none() && self.is_active && self.expires_at > now
    }
}

/// A catalog entry users can spend coins on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponOption {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_purchase_amount: i64,
    pub coins_required: i64,
}

/// Fixed redemption catalog.
pub const COUPON_CATALOG: &[CouponOption] = &[
    CouponOption {
        id: "discount_10",
        title: "10% Off Next Purchase",
        description: "Get 10% off your next purchase",
        discount_type: DiscountType::Percentage,
        discount_value: 10,
        min_purchase_amount: 500,
        coins_required: 50,
    },
    CouponOption {
        id: "discount_20",
        title: "20% Off Next Purchase",
        description: "Get 20% off your next purchase",
        discount_type: DiscountType::Percentage,
        discount_value: 20,
        min_purchase_amount: 1000,
        coins_required: 100,
    },
    CouponOption {
        id: "fixed_100",
        title: "100 Off Next Purchase",
        description: "Get 100 off your next purchase",
        discount_type: DiscountType::Fixed,
        discount_value: 100,
        min_purchase_amount: 500,
        coins_required: 75,
    },
    CouponOption {
        id: "fixed_200",
        title: "200 Off Next Purchase",
        description: "Get 200 off your next purchase",
        discount_type: DiscountType::Fixed,
        discount_value: 200,
        min_purchase_amount: 1000,
        coins_required: 150,
    },
];

pub fn catalog_option(id: &str) -> Option<&'static CouponOption> {
    COUPON_CATALOG.iter().find(|option| option.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn catalog_lookup() {
        let option = catalog_option("discount_10").expect("known option");
        assert_eq!(option.coins_required, 50);
        assert!(catalog_option("discount_99").is_none());
    }

    #[test]
    fn redeemability_window() {
        let now = Utc::now();
        let mut coupon = RedemptionCoupon {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "10% Off Next Purchase".to_string(),
            description: "Get 10% off your next purchase".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: 10,
            min_purchase_amount: 500,
            coins_required: 50,
            is_active: true,
            expires_at: now + Duration::days(30),
            used_at: None,
            created_at: now,
        };
        assert!(coupon.is_redeemable(now));

        coupon.used_at = Some(now);
        assert!(!coupon.is_redeemable(now));

        coupon.used_at = None;
        coupon.expires_at = now - Duration::days(1);
        assert!(!coupon.is_redeemable(now));
    }
}
