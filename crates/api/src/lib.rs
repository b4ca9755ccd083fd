//! IPChat API Library
//!
//! Page routes, account signup/login with bearer tokens, and the real-time
//! chat channel.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod security;
pub mod state;
pub mod websocket;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
