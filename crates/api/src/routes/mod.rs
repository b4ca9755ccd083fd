//! HTTP routes

pub mod auth;
pub mod health;
pub mod pages;

use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{security::security_headers_middleware, state::AppState, websocket::ws_handler};

/// Create all routes
pub fn create_router(state: AppState) -> Router {
    let views = state.config.views_dir.clone();
    let static_dir = state.config.static_dir.clone();

    // Health check routes (at root level for infrastructure monitoring)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    let page_routes = Router::new()
        .route("/", pages::page(&views, pages::INDEX))
        .route("/login", pages::page(&views, pages::LOGIN).post(auth::login))
        .route("/products", pages::page(&views, pages::PRODUCTS))
        .route("/payment", pages::page(&views, pages::PAYMENT))
        .route("/chat", pages::page(&views, pages::CHAT))
        .route("/about", pages::page(&views, pages::ABOUT));

    let account_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/logout", post(auth::logout))
        .route("/protected", get(auth::protected));

    // Realtime chat channel (participants are anonymous)
    let websocket_routes = Router::new().route("/ws", get(ws_handler));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    // Combine all routes; anything unmatched is looked up in the static directory
    Router::new()
        .merge(health_routes)
        .merge(page_routes)
        .merge(account_routes)
        .merge(websocket_routes)
        .fallback_service(ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
