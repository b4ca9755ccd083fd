//! IPChat Shared Types and Utilities
//!
//! This crate contains types and database utilities shared by the IPChat server.

pub mod db;
pub mod types;

pub use db::*;
pub use types::*;
