use std::sync::Arc;

use sqlx::PgPool;

use crate::mailer::Mailer;

/// Everything a handler needs, built once at process start and injected via
/// the router. No ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(pool: PgPool, mailer: Arc<dyn Mailer>) -> Self {
        Self { pool, mailer }
    }
}
