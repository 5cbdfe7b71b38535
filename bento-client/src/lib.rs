//! Bento Client - cart and order cache for the Bento marketplace
//!
//! Client-side layer that keeps the shopping cart and the order history
//! usable while the backend is unreachable: cached orders are merged
//! with fresh remote reads, and the view degrades to a non-authoritative
//! sample set rather than an empty screen.

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod fallback;
pub mod notify;
pub mod reconcile;
pub mod repository;
pub mod storage;

pub use api::{MarketApi, NetworkClient};
pub use cart::CartStore;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use notify::{Notice, NoticeLevel, Notifier};
pub use repository::{FeedSource, FetchOutcome, OrderFeed, OrderLookup, OrderRepository};
pub use storage::{CacheStorage, FileStorage, MemoryStorage, StorageError};

// Re-export shared types for convenience
pub use shared::client::{ApiResponse, OrderListResponse, PaymentSelection, PlaceOrderRequest};
pub use shared::{CartItemInput, CartLine, Identity, Order, OrderStatus, RestaurantGroup};
