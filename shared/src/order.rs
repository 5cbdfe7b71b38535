//! Order Model
//!
//! An order is created server-side at checkout and mirrored into the
//! client cache. The client never mutates an order except by replacing
//! it with a newer remote read of the same id.

use serde::{Deserialize, Serialize};

use crate::types::{Cents, Timestamp};

/// Order status as reported by the marketplace backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether the order has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    /// Unit price in cents
    pub unit_price: Cents,
}

/// Delivery address snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DeliveryAddress {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Contact info snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Order entity (mirrored from the backend)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Opaque primary key
    pub order_id: String,
    /// Display code shown to the customer
    pub order_number: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    /// Subtotal in cents
    pub subtotal: Cents,
    /// Delivery fee in cents
    pub delivery_fee: Cents,
    /// Tax in cents
    pub tax: Cents,
    /// CSR donation in cents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation: Option<Cents>,
    /// Discount in cents
    #[serde(default)]
    pub discount: Cents,
    /// Total in cents (= subtotal + delivery_fee + tax + donation - discount)
    pub total: Cents,
    /// Creation time (Unix milliseconds)
    pub created_at: Timestamp,
    /// Restaurant reference (String ID)
    pub restaurant_ref: String,
    pub delivery_address: DeliveryAddress,
    pub contact_info: ContactInfo,
}

impl Order {
    /// Total recomputed from the components
    pub fn computed_total(&self) -> Cents {
        self.subtotal + self.delivery_fee + self.tax + self.donation.unwrap_or(0) - self.discount
    }

    /// Whether the stored total matches the components and is non-negative
    pub fn is_total_consistent(&self) -> bool {
        self.total == self.computed_total() && self.total >= 0
    }

    /// Creation time as a UTC datetime (None if the millis are out of range)
    pub fn created_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_millis(self.created_at)
    }
}
