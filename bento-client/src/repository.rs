//! OrderRepository - order history cache orchestration
//!
//! Coordinates persisted storage, the network fetch and the reconciler.
//! Every call resolves to some displayable order set: live, cached, or
//! the sample fallback. Failures of storage and network are recovered
//! here and surfaced only as advisory notices; the single error-like
//! state a caller sees is an explicit `NotFound` lookup.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use shared::client::{PaymentSelection, PlaceOrderRequest};
use shared::order::{ContactInfo, DeliveryAddress};
use shared::types::Cents;
use shared::{Identity, Order};

use crate::api::MarketApi;
use crate::cart::CartStore;
use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::fallback;
use crate::notify::{Notice, Notifier};
use crate::reconcile;
use crate::storage::{self, CacheStorage};

// ============================================================================
// Outcome types
// ============================================================================

/// Where a returned order set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSource {
    /// Fresh merge of cache and backend
    Live,
    /// Backend unreachable, persisted cache shown
    Cached,
    /// Backend unreachable and no cache; non-authoritative samples shown
    Sample,
}

/// An order set handed to the UI
#[derive(Debug, Clone)]
pub struct OrderFeed {
    pub orders: Vec<Order>,
    pub source: FeedSource,
}

/// Result of a fetch cycle
#[derive(Debug)]
pub enum FetchOutcome {
    Completed(OrderFeed),
    /// The identity changed while the request was in flight; the result
    /// was discarded without touching any state
    Superseded,
}

/// Result of a single-order lookup
#[derive(Debug, Clone, PartialEq)]
pub enum OrderLookup {
    Found(Order),
    /// The id is absent from the most recently returned set
    NotFound,
    /// No set has been returned yet for this identity
    NotLoaded,
}

// ============================================================================
// OrderRepository
// ============================================================================

/// Order history cache for the current session
pub struct OrderRepository {
    api: Arc<dyn MarketApi>,
    storage: Arc<dyn CacheStorage>,
    notifier: Notifier,
    page_size: usize,
    /// Identity the session is currently scoped to
    current: Mutex<Identity>,
    /// Bumped on every identity change; in-flight fetches compare it at
    /// resolution and discard themselves when it moved
    generation: AtomicU64,
    /// Most recently returned order set per identity (memory only)
    results: Mutex<HashMap<Identity, Vec<Order>>>,
}

impl OrderRepository {
    pub fn new(
        api: Arc<dyn MarketApi>,
        storage: Arc<dyn CacheStorage>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            api,
            storage,
            notifier: Notifier::new(Duration::from_millis(config.notice_ttl_ms)),
            page_size: config.page_size.max(1),
            current: Mutex::new(Identity::Guest),
            generation: AtomicU64::new(0),
            results: Mutex::new(HashMap::new()),
        }
    }

    /// Handle to the advisory notice slot (cheap clone)
    pub fn notifier(&self) -> Notifier {
        self.notifier.clone()
    }

    /// The identity the session is currently scoped to
    pub fn identity(&self) -> Identity {
        self.current
            .lock()
            .map(|id| id.clone())
            .unwrap_or_default()
    }

    /// Scope the session to a new identity
    ///
    /// Bumps the generation so any fetch still in flight for the old
    /// identity discards its result instead of overwriting state.
    pub fn set_identity(&self, identity: Identity) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut current) = self.current.lock() {
            *current = identity;
        }
    }

    /// Reset on logout: back to guest, all in-memory sets dropped
    ///
    /// Persisted caches stay on disk, keyed per identity.
    pub fn reset(&self) {
        self.set_identity(Identity::Guest);
        if let Ok(mut results) = self.results.lock() {
            results.clear();
        }
    }

    /// The most recently returned set for `identity`, without any I/O
    ///
    /// Stale-while-revalidate read: callers render this while a fetch
    /// runs in the background.
    pub fn cached(&self, identity: &Identity) -> Option<Vec<Order>> {
        self.results
            .lock()
            .ok()
            .and_then(|results| results.get(identity).cloned())
    }

    /// Full fetch cycle: cache read, network call, merge, persist
    pub async fn fetch(&self, identity: &Identity) -> FetchOutcome {
        let generation = self.generation.load(Ordering::SeqCst);

        let key = storage::order_cache_key(identity);
        let local: Vec<Order> = match storage::load_typed(self.storage.as_ref(), &key) {
            Ok(Some(orders)) => orders,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(identity = %identity, error = %e, "Order cache unreadable, treating as empty");
                Vec::new()
            }
        };

        // Expose the cached set before the network resolves, but never
        // replace a set that is already on screen with this default
        if let Ok(mut results) = self.results.lock() {
            results.entry(identity.clone()).or_insert_with(|| local.clone());
        }

        let listed = self.api.list_orders(identity).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(identity = %identity, "Fetch superseded by identity change, result discarded");
            return FetchOutcome::Superseded;
        }

        match listed {
            Ok(remote) => {
                let merged = reconcile::merge(&local, &remote);
                if let Err(e) = storage::save_typed(self.storage.as_ref(), &key, &merged) {
                    tracing::warn!(identity = %identity, error = %e, "Order cache persist failed, continuing memory-only");
                }
                self.record(identity, merged.clone());
                FetchOutcome::Completed(OrderFeed {
                    orders: merged,
                    source: FeedSource::Live,
                })
            }
            Err(e) if !local.is_empty() => {
                tracing::warn!(identity = %identity, error = %e, "Order listing failed, serving cache");
                self.notifier.notify(Notice::warning(
                    "Connection failed",
                    "Showing last known orders, connection failed",
                ));
                self.record(identity, local.clone());
                FetchOutcome::Completed(OrderFeed {
                    orders: local,
                    source: FeedSource::Cached,
                })
            }
            Err(e) => {
                tracing::warn!(identity = %identity, error = %e, "Order listing failed with empty cache, serving samples");
                self.notifier.notify(Notice::warning(
                    "Connection failed",
                    "Showing sample data, connection failed",
                ));
                // Samples are display-only and never persisted
                let samples = fallback::sample_orders();
                self.record(identity, samples.clone());
                FetchOutcome::Completed(OrderFeed {
                    orders: samples,
                    source: FeedSource::Sample,
                })
            }
        }
    }

    /// Look up one order in the most recently returned set
    pub fn get(&self, identity: &Identity, order_id: &str) -> OrderLookup {
        let Some(orders) = self.cached(identity) else {
            return OrderLookup::NotLoaded;
        };

        match orders.iter().find(|o| o.order_id == order_id) {
            Some(order) => OrderLookup::Found(order.clone()),
            None => OrderLookup::NotFound,
        }
    }

    /// Place one order via the checkout collaborator
    ///
    /// On success the returned order is inserted into the cache
    /// optimistically, so the history view shows it before the next
    /// fetch cycle.
    pub async fn place_order(&self, request: &PlaceOrderRequest) -> ApiResult<Order> {
        let identity = self.identity();
        let generation = self.generation.load(Ordering::SeqCst);

        let order = self.api.place_order(request).await?;

        if self.generation.load(Ordering::SeqCst) == generation {
            self.insert_order(&identity, order.clone());
        } else {
            tracing::debug!(order_id = %order.order_id, "Identity changed during checkout, cache write skipped");
        }

        Ok(order)
    }

    /// Check out the whole cart: one placement per restaurant group
    ///
    /// Each group's lines leave the cart as soon as its placement
    /// succeeds, so a failure mid-way leaves only the unplaced groups
    /// behind and a retry never re-submits an order the backend already
    /// accepted.
    pub async fn place_all(
        &self,
        cart: &mut CartStore,
        address: &DeliveryAddress,
        contact: &ContactInfo,
        payment: &PaymentSelection,
        donation: Option<Cents>,
    ) -> ApiResult<Vec<Order>> {
        let mut placed = Vec::new();

        for (idx, group) in cart.group_by_restaurant().into_iter().enumerate() {
            let restaurant_id = group.restaurant_id.clone();
            let request = PlaceOrderRequest {
                restaurant_id: group.restaurant_id,
                lines: group.lines,
                delivery_address: address.clone(),
                contact_info: contact.clone(),
                payment: payment.clone(),
                // The checkout-wide donation rides on the first placement
                donation: if idx == 0 { donation } else { None },
            };

            placed.push(self.place_order(&request).await?);
            cart.remove_restaurant(&restaurant_id);
        }

        Ok(placed)
    }

    /// One page of the order history, newest first
    ///
    /// Pagination slices the already-returned in-memory set; it never
    /// triggers a fetch.
    pub fn page(&self, identity: &Identity, page_index: usize) -> Vec<Order> {
        let Some(mut orders) = self.cached(identity) else {
            return Vec::new();
        };

        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
            .into_iter()
            .skip(page_index * self.page_size)
            .take(self.page_size)
            .collect()
    }

    /// Number of pages in the current set
    pub fn page_count(&self, identity: &Identity) -> usize {
        self.cached(identity)
            .map(|orders| orders.len().div_ceil(self.page_size))
            .unwrap_or(0)
    }

    /// Record the set most recently handed to the UI
    fn record(&self, identity: &Identity, orders: Vec<Order>) {
        if let Ok(mut results) = self.results.lock() {
            results.insert(identity.clone(), orders);
        }
    }

    /// Optimistic insert of a freshly placed order (newest first)
    fn insert_order(&self, identity: &Identity, order: Order) {
        let key = storage::order_cache_key(identity);
        let mut cached: Vec<Order> = match storage::load_typed(self.storage.as_ref(), &key) {
            Ok(Some(orders)) => orders,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(identity = %identity, error = %e, "Order cache unreadable, rebuilding from placement");
                Vec::new()
            }
        };

        cached.retain(|o| o.order_id != order.order_id);
        cached.insert(0, order.clone());
        if let Err(e) = storage::save_typed(self.storage.as_ref(), &key, &cached) {
            tracing::warn!(identity = %identity, error = %e, "Order cache persist failed, continuing memory-only");
        }

        if let Ok(mut results) = self.results.lock() {
            let entry = results.entry(identity.clone()).or_default();
            entry.retain(|o| o.order_id != order.order_id);
            entry.insert(0, order);
        }
    }
}
