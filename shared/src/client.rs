//! Client-related types shared between backend and client
//!
//! Request/response DTOs for the order-list and checkout endpoints.
//! The backend owns order creation; the client only mirrors the result.

use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::order::{ContactInfo, DeliveryAddress, Order};
use crate::types::Cents;

// Re-export ApiResponse from response module
pub use crate::response::ApiResponse;

// =============================================================================
// Checkout API DTOs
// =============================================================================

/// Payment selection forwarded to the checkout endpoint
///
/// Payment details are collected elsewhere; this layer only carries the
/// chosen method and an opaque provider reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSelection {
    /// Payment method (e.g. "CARD", "CASH_ON_DELIVERY")
    pub method: String,
    /// Opaque reference issued by the payment collaborator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Place-order request (one restaurant group per request)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    /// Restaurant reference (String ID)
    pub restaurant_id: String,
    /// Cart lines for this restaurant
    pub lines: Vec<CartLine>,
    pub delivery_address: DeliveryAddress,
    pub contact_info: ContactInfo,
    pub payment: PaymentSelection,
    /// Optional CSR donation in cents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation: Option<Cents>,
}

/// Order list response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
}
