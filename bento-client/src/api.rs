//! Marketplace API client
//!
//! `MarketApi` is the seam between the cache layer and the backend: the
//! order-list endpoint and the checkout endpoint. `NetworkClient` is the
//! HTTP implementation; tests substitute their own.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use shared::client::{ApiResponse, OrderListResponse, PlaceOrderRequest};
use shared::{Identity, Order};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

// ============================================================================
// MarketApi Trait
// ============================================================================

/// External collaborators: order listing and checkout
#[async_trait]
pub trait MarketApi: Send + Sync {
    /// List all orders belonging to the identity
    async fn list_orders(&self, identity: &Identity) -> ApiResult<Vec<Order>>;

    /// Place one order (one restaurant group per request)
    async fn place_order(&self, request: &PlaceOrderRequest) -> ApiResult<Order>;
}

// ============================================================================
// NetworkClient - HTTP implementation
// ============================================================================

/// HTTP client for the marketplace backend
#[derive(Debug, Clone)]
pub struct NetworkClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkClient {
    /// Create a new network client from configuration
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the bearer token
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Clear the bearer token (logout)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.get(&url);

        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        idempotency_key: Option<&str>,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.post(&url).json(body);

        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        if let Some(key) = idempotency_key {
            req = req.header("Idempotency-Key", key);
        }

        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> ApiResult<T> {
        let status = resp.status();

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return match status {
                StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ApiError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ApiError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ApiError::Validation(text)),
                _ => Err(ApiError::Internal(text)),
            };
        }

        resp.json().await.map_err(Into::into)
    }
}

#[async_trait]
impl MarketApi for NetworkClient {
    async fn list_orders(&self, identity: &Identity) -> ApiResult<Vec<Order>> {
        tracing::debug!(identity = %identity, "Listing orders");

        let resp: ApiResponse<OrderListResponse> = self.get("/api/orders").await?;
        let data = resp
            .data
            .ok_or_else(|| ApiError::InvalidResponse("Missing order list data".into()))?;
        Ok(data.orders)
    }

    async fn place_order(&self, request: &PlaceOrderRequest) -> ApiResult<Order> {
        // Client-generated idempotency key guards against double submission
        // on retried checkouts
        let key = uuid::Uuid::new_v4().to_string();
        tracing::debug!(restaurant = %request.restaurant_id, idempotency_key = %key, "Placing order");

        let resp: ApiResponse<Order> = self.post("/api/orders", request, Some(&key)).await?;
        resp.data
            .ok_or_else(|| ApiError::InvalidResponse("Missing order data".into()))
    }
}
