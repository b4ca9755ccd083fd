//! Authentication module for IPChat

pub mod bearer;
pub mod jwt;
pub mod password;

pub use bearer::{authenticate, extract_bearer_token};
pub use jwt::{Claims, JwtError, JwtManager};
pub use password::{hash_password, validate_password, verify_password};
