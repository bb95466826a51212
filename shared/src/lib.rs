//! Shared types for the Mercado storefront
//!
//! Common types used by both the server and the client crate: domain
//! models, wire request/response payloads, the error taxonomy with its
//! HTTP mapping, and small utilities.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult};
pub use serde::{Deserialize, Serialize};
