//! Mercado Client - HTTP client for the Mercado storefront API
//!
//! Typed wrappers over every server endpoint plus a locally persisted
//! shopping cart ([`LocalCart`]) that survives restarts and submits
//! itself through the cart checkout endpoint.

pub mod cart;
pub mod client;
pub mod config;
pub mod error;

pub use cart::LocalCart;
pub use client::{HealthStatus, MercadoClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};

// Re-export shared types for convenience
pub use shared::models::{
    CartItem, Category, CustomerOrder, LoginRequest, Product, ProductCreate, ProfileUpdate,
    RegisterRequest, UserProfile,
};
pub use shared::response::{OrderCreated, TokenResponse};
