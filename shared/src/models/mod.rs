//! Data models
//!
//! Shared between mercado-server and the client crate (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod category;
pub mod order;
pub mod payment;
pub mod product;
pub mod user;

// Re-exports
pub use category::*;
pub use order::*;
pub use payment::*;
pub use product::*;
pub use user::*;
