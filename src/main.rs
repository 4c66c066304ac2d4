use rewear_api::{config, database, mailer, state::AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting ReWear API in {:?} mode", config.environment);

    let pool = database::manager::connect(config)
        .unwrap_or_else(|e| panic!("failed to create database pool: {}", e));

    if let Err(e) = database::manager::migrate(&pool).await {
        // The health endpoint reports degraded until the database comes back
        tracing::warn!("migrations not applied: {}", e);
    }

    let mailer = mailer::from_config(&config.mail);
    let app = rewear_api::app(AppState::new(pool, mailer));

    // Allow tests or deployments to override port via env
    let port = std::env::var("REWEAR_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(5000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("ReWear API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
