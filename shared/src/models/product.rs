//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// `remaining` is the stock on hand; it is only ever decreased, by the
/// order placement workflow, and never goes negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub remaining: i64,
    pub category_id: Option<i64>,
    pub image_url: Option<String>,
    pub created_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// Initial stock, defaults to 0
    pub remaining: Option<i64>,
    pub category_id: Option<i64>,
    pub image_url: Option<String>,
}
