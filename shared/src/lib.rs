//! Shared types for the Bento marketplace
//!
//! Common types used across multiple crates including cart and order
//! models, identity scoping, money helpers and API response structures.

pub mod cart;
pub mod client;
pub mod identity;
pub mod money;
pub mod order;
pub mod response;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use cart::{CartLine, CartItemInput, RestaurantGroup};
pub use identity::Identity;
pub use order::{Order, OrderItem, OrderStatus};
pub use response::ApiResponse;
