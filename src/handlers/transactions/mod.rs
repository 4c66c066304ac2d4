mod initiate;
mod list;
mod respond;

pub use initiate::{buy_item, offer_on_item};
pub use list::{buyer_transactions, seller_transactions};
pub use respond::respond_to_transaction;
