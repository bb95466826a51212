//! Order Model
//!
//! Wire field names follow the public API contract (`customerID`,
//! `productID`, `paymentmethod`); request fields that the contract
//! requires are `Option` so missing input surfaces as a 400 with the
//! documented message rather than a deserialization rejection.

use serde::{Deserialize, Serialize};

/// Order header row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub order_date: i64,
    pub total_cost: f64,
    pub status: String,
}

/// Single-product order payload (implicit quantity 1)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(rename = "customerID")]
    pub customer_id: Option<i64>,
    #[serde(rename = "productID")]
    pub product_id: Option<i64>,
    #[serde(rename = "paymentmethod")]
    pub payment_method: Option<String>,
}

/// One cart line in a multi-product order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "productID")]
    pub product_id: i64,
    pub quantity: i64,
}

/// Multi-product (cart) order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceCartOrderRequest {
    #[serde(rename = "customerID")]
    pub customer_id: Option<i64>,
    pub products: Option<Vec<CartItem>>,
    #[serde(rename = "paymentmethod")]
    pub payment_method: Option<String>,
}

/// Order header as shown in a customer's history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderSummary {
    pub id: i64,
    pub order_date: i64,
    pub total_cost: f64,
    pub status: String,
    pub customer_name: String,
}

/// Resolved line item. Product name/price are joined at read time,
/// so this shows the current price, not a snapshot of the price paid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLineView {
    pub order_id: i64,
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

/// One order history entry: header plus its resolved line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerOrder {
    pub order: OrderSummary,
    pub products: Vec<OrderLineView>,
}
