mod balance;
mod coupons;
mod history;

pub use balance::coin_balance;
pub use coupons::{available_coupons, create_coupon, my_coupons, redeem_coupon};
pub use history::coin_history;

use sqlx::{Postgres, Transaction as SqlTransaction};
use uuid::Uuid;

use crate::database::models::coin::CoinEntryKind;
use crate::error::ApiError;

/// Conditionally debit coins and write the matching ledger entry, inside the
/// caller's database transaction. Returns the remaining balance, or None when
/// the balance cannot cover the debit (nothing is written in that case).
pub(crate) async fn debit_coins(
    tx: &mut SqlTransaction<'_, Postgres>,
    user_id: Uuid,
    coins: i64,
    description: &str,
) -> Result<Option<i64>, ApiError> {
    let balance = sqlx::query_scalar::<_, i64>(
        "UPDATE users
         SET coin_balance = coin_balance - $1, updated_at = now()
         WHERE id = $2 AND coin_balance >= $1
         RETURNING coin_balance",
    )
    .bind(coins)
    .bind(user_id)
    .fetch_optional(&mut **tx)
    .await?;

    let Some(balance) = balance else {
        return Ok(None);
    };

    sqlx::query(
        "INSERT INTO coin_transactions (user_id, kind, amount, description, balance_after)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user_id)
    .bind(CoinEntryKind::Redeemed.as_str())
    .bind(-coins)
    .bind(description)
    .bind(balance)
    .execute(&mut **tx)
    .await?;

    Ok(Some(balance))
}
