//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use shared::models::{
    CartItem, Category, CustomerOrder, LoginRequest, PlaceCartOrderRequest, PlaceOrderRequest,
    Product, ProductCreate, ProfileUpdate, RegisterRequest, UserProfile,
};
use shared::response::{MessageResponse, OrderCreated, TokenResponse};

/// Health probe reply
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

/// HTTP client for making network requests to the Mercado server
#[derive(Debug, Clone)]
pub struct MercadoClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl MercadoClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.set_token(token);
        self
    }

    /// Replace the stored authentication token
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut request = self.client.get(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = self.client.post(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = self.client.put(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let message = error_message(&text);
            tracing::debug!(%status, %message, "Request failed");
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(message)),
                _ => Err(ClientError::Server(message)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Health API ==========

    /// Probe the server's health endpoint
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        self.get("/health").await
    }

    /// Poll the health endpoint until the server answers
    ///
    /// Useful right after spawning a server, before issuing real
    /// traffic. The error from the final attempt is returned as-is.
    pub async fn wait_until_healthy(
        &self,
        max_attempts: u32,
        delay: std::time::Duration,
    ) -> ClientResult<()> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.health().await {
                Ok(_) => return Ok(()),
                Err(e) if attempt >= max_attempts => return Err(e),
                Err(_) => tokio::time::sleep(delay).await,
            }
        }
    }

    // ========== Auth API ==========

    /// Register a new customer, returning the issued token
    pub async fn register(&self, req: &RegisterRequest) -> ClientResult<String> {
        let reply: TokenResponse = self.post("/auth/register", req).await?;
        Ok(reply.token)
    }

    /// Login with username and password, returning the issued token
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<String> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let reply: TokenResponse = self.post("/auth/login", &req).await?;
        Ok(reply.token)
    }

    /// Get the authenticated user's profile (requires a token)
    pub async fn profile(&self) -> ClientResult<UserProfile> {
        self.get("/auth/profile").await
    }

    // ========== Catalog API ==========

    /// List all products
    pub async fn products(&self) -> ClientResult<Vec<Product>> {
        self.get("/api/products").await
    }

    /// Get a single product by id
    pub async fn product(&self, id: i64) -> ClientResult<Product> {
        self.get(&format!("/api/products/{id}")).await
    }

    /// Search products by name or description
    pub async fn search_products(&self, query: &str) -> ClientResult<Vec<Product>> {
        self.get(&format!("/api/products/search?q={query}")).await
    }

    /// Create a product
    pub async fn create_product(&self, product: &ProductCreate) -> ClientResult<Product> {
        self.post("/api/products", product).await
    }

    /// List all categories
    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.get("/api/categories").await
    }

    // ========== Customer API ==========

    /// List all customers
    pub async fn customers(&self) -> ClientResult<Vec<UserProfile>> {
        self.get("/api/customers").await
    }

    /// Get a customer's profile
    pub async fn customer(&self, id: i64) -> ClientResult<UserProfile> {
        self.get(&format!("/api/customers/{id}")).await
    }

    /// Update a customer's profile (absent fields keep their value)
    pub async fn update_customer(
        &self,
        id: i64,
        update: &ProfileUpdate,
    ) -> ClientResult<UserProfile> {
        self.put(&format!("/api/customers/{id}"), update).await
    }

    /// Fetch a customer's order history, newest first
    pub async fn customer_orders(&self, id: i64) -> ClientResult<Vec<CustomerOrder>> {
        self.get(&format!("/api/customers/{id}/orders")).await
    }

    // ========== Order API ==========

    /// Place a single-product order (implicit quantity 1)
    pub async fn place_order(
        &self,
        customer_id: i64,
        product_id: i64,
        payment_method: &str,
    ) -> ClientResult<OrderCreated> {
        let req = PlaceOrderRequest {
            customer_id: Some(customer_id),
            product_id: Some(product_id),
            payment_method: Some(payment_method.to_string()),
        };
        self.post("/api/orders", &req).await
    }

    /// Place a multi-product cart order
    pub async fn place_cart_order(
        &self,
        customer_id: i64,
        items: &[CartItem],
        payment_method: &str,
    ) -> ClientResult<OrderCreated> {
        let req = PlaceCartOrderRequest {
            customer_id: Some(customer_id),
            products: Some(items.to_vec()),
            payment_method: Some(payment_method.to_string()),
        };
        self.post("/api/orders/cart", &req).await
    }
}

/// Extract the server's `message` field from an error body, falling
/// back to the raw text.
fn error_message(text: &str) -> String {
    serde_json::from_str::<MessageResponse>(text)
        .map(|m| m.message)
        .unwrap_or_else(|_| text.to_string())
}
