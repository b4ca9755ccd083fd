//! Shared application state

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::JwtManager;
use crate::config::Config;
use crate::websocket::WebSocketState;

/// State handed to every route handler
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt_manager: JwtManager,
    pub ws_state: WebSocketState,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        let jwt_manager = JwtManager::new(&config.jwt_secret, config.jwt_expiry_hours);

        Self {
            pool,
            config: Arc::new(config),
            jwt_manager,
            ws_state: WebSocketState::new(),
        }
    }
}
