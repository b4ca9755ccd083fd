//! HTML page routes

use std::path::Path;

use axum::routing::{get_service, MethodRouter};
use tower_http::services::ServeFile;

use crate::state::AppState;

pub const INDEX: &str = "index.html";
pub const LOGIN: &str = "loginSignUp.html";
pub const PRODUCTS: &str = "products.html";
pub const PAYMENT: &str = "payment.html";
pub const CHAT: &str = "chat.html";
pub const ABOUT: &str = "about.html";

/// GET handler serving `file` from the views directory
pub fn page(views_dir: &str, file: &str) -> MethodRouter<AppState> {
    get_service(ServeFile::new(Path::new(views_dir).join(file)))
}
