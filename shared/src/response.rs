//! API Response types
//!
//! Reply bodies shared by server handlers and the typed client. The wire
//! format is flat JSON (no envelope); field names follow the public API
//! contract (`orderID`, `token`, `message`).

use serde::{Deserialize, Serialize};

/// Plain message reply
///
/// ```json
/// { "message": "No orders found for this customer" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Successful order creation reply
///
/// ```json
/// { "message": "Order placed successfully", "orderID": 42 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreated {
    pub message: String,
    #[serde(rename = "orderID")]
    pub order_id: i64,
}

impl OrderCreated {
    pub fn new(order_id: i64) -> Self {
        Self {
            message: "Order placed successfully".to_string(),
            order_id,
        }
    }
}

/// Token reply for register/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
