//! Cart line types
//!
//! A cart line is one purchasable item at a given quantity. Lines are
//! keyed by `item_id` (at most one line per item) and carry a snapshot
//! of the restaurant that sells the item, so the cart can be rendered
//! and checked out as one order per restaurant.

use serde::{Deserialize, Serialize};

use crate::types::Cents;

/// One cart entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// Menu item ID (unique key within the cart)
    pub item_id: String,
    /// Item name snapshot
    pub name: String,
    /// Unit price in cents (non-negative)
    pub unit_price: Cents,
    /// Quantity (>= 1; a line at quantity 0 is removed, never stored)
    pub quantity: u32,
    /// Restaurant reference (String ID)
    pub restaurant_id: String,
    /// Restaurant name snapshot
    pub restaurant_name: String,
    /// Item image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl CartLine {
    /// Line total in cents
    pub fn line_total(&self) -> Cents {
        self.unit_price * i64::from(self.quantity)
    }
}

/// Item input for adding to the cart (quantity supplied separately)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemInput {
    /// Menu item ID
    pub item_id: String,
    /// Item name
    pub name: String,
    /// Unit price in cents
    pub unit_price: Cents,
    /// Restaurant reference (String ID)
    pub restaurant_id: String,
    /// Restaurant name
    pub restaurant_name: String,
    /// Item image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl CartItemInput {
    /// Materialize this input as a cart line at the given quantity
    pub fn into_line(self, quantity: u32) -> CartLine {
        CartLine {
            item_id: self.item_id,
            name: self.name,
            unit_price: self.unit_price,
            quantity,
            restaurant_id: self.restaurant_id,
            restaurant_name: self.restaurant_name,
            image_ref: self.image_ref,
        }
    }
}

/// Cart lines grouped under one restaurant (first-insertion order)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantGroup {
    /// Restaurant reference (String ID)
    pub restaurant_id: String,
    /// Restaurant name snapshot
    pub restaurant_name: String,
    /// Lines belonging to this restaurant, in insertion order
    pub lines: Vec<CartLine>,
}

impl RestaurantGroup {
    /// Group subtotal in cents
    pub fn subtotal(&self) -> Cents {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}
