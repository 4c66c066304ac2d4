pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod mailer;
pub mod middleware;
pub mod state;

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        // Service
        .route("/", get(handlers::service::root))
        .route("/api/health", get(handlers::service::health))
        // API surface
        .merge(auth_routes())
        .merge(dashboard_routes())
        .merge(coin_routes())
        .merge(community_routes())
        // Unknown routes answer JSON, not bare 404s
        .fallback(handlers::service::not_found)
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    let config = config::config();
    if matches!(config.environment, config::Environment::Development) {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        // Public account lifecycle
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/verify-email", post(auth::verify_email))
        .route("/api/auth/resend-otp", post(auth::resend_otp))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/reset-password", post(auth::reset_password))
        // Bearer-token endpoints
        .route(
            "/api/auth/profile",
            get(auth::get_profile).put(auth::update_profile),
        )
        .route("/api/auth/logout", post(auth::logout))
}

fn dashboard_routes() -> Router<AppState> {
    use handlers::{dashboard, transactions};

    Router::new()
        .route("/api/dashboard/overview", get(dashboard::overview))
        // Browsing is public; listing and editing require a bearer token
        .route(
            "/api/dashboard/items",
            get(dashboard::browse_items).post(dashboard::create_item),
        )
        .route(
            "/api/dashboard/items/:id",
            get(dashboard::get_item).put(dashboard::update_item),
        )
        .route("/api/dashboard/items/:id/buy", post(transactions::buy_item))
        .route(
            "/api/dashboard/items/:id/offer",
            post(transactions::offer_on_item),
        )
        .route("/api/dashboard/user/listed", get(dashboard::listed_items))
        .route("/api/dashboard/user/bought", get(dashboard::bought_items))
        .route(
            "/api/dashboard/seller/transactions",
            get(transactions::seller_transactions),
        )
        .route(
            "/api/dashboard/buyer/transactions",
            get(transactions::buyer_transactions),
        )
        .route(
            "/api/dashboard/transactions/:id/respond",
            put(transactions::respond_to_transaction),
        )
}

fn coin_routes() -> Router<AppState> {
    use handlers::coins;

    Router::new()
        .route("/api/coins/balance", get(coins::coin_balance))
        .route("/api/coins/transactions", get(coins::coin_history))
        .route("/api/coins/redemption-coupons", get(coins::my_coupons))
        .route("/api/coins/available-coupons", get(coins::available_coupons))
        .route("/api/coins/create-coupon", post(coins::create_coupon))
        .route("/api/coins/redeem-coupon", post(coins::redeem_coupon))
}

fn community_routes() -> Router<AppState> {
    use handlers::community;

    Router::new().route(
        "/api/community/thoughts",
        get(community::list_thoughts).post(community::post_thought),
    )
}
