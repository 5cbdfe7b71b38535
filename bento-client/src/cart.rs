//! CartStore - in-session shopping cart
//!
//! Owns the current line set for one identity. Independent of the
//! network: every mutation is applied in memory first and then persisted
//! best-effort. A failed persist is logged and swallowed; the in-memory
//! state stays authoritative for the session.

use std::sync::Arc;

use shared::types::Cents;
use shared::{CartItemInput, CartLine, Identity, RestaurantGroup};

use crate::storage::{self, CacheStorage};

/// In-session shopping cart, scoped to one identity
pub struct CartStore {
    identity: Identity,
    storage: Arc<dyn CacheStorage>,
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Create a cart for `identity`, restoring any persisted snapshot
    ///
    /// Restoring at construction time means an empty default can never
    /// overwrite a snapshot that simply has not been read yet.
    pub fn new(identity: Identity, storage: Arc<dyn CacheStorage>) -> Self {
        let key = storage::cart_key(&identity);
        let lines = match storage::load_typed::<Vec<CartLine>>(storage.as_ref(), &key) {
            Ok(Some(lines)) => lines,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(identity = %identity, error = %e, "Cart snapshot unreadable, starting empty");
                Vec::new()
            }
        };

        Self {
            identity,
            storage,
            lines,
        }
    }

    /// The identity owning this cart
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Current lines in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total item count across all lines
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Add an item; an existing line for the same `item_id` has its
    /// quantity incremented instead of a duplicate line appended
    pub fn add(&mut self, item: CartItemInput, quantity: u32) {
        if quantity == 0 {
            tracing::warn!(item_id = %item.item_id, "Ignoring add with zero quantity");
            return;
        }

        match self.lines.iter_mut().find(|l| l.item_id == item.item_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(item.into_line(quantity)),
        }
        self.persist();
    }

    /// Remove a line; no-op if absent
    pub fn remove(&mut self, item_id: &str) {
        let before = self.lines.len();
        self.lines.retain(|l| l.item_id != item_id);
        if self.lines.len() != before {
            self.persist();
        }
    }

    /// Remove every line sold by a restaurant; no-op if none
    ///
    /// Checkout drops each restaurant group once its order is accepted.
    pub fn remove_restaurant(&mut self, restaurant_id: &str) {
        let before = self.lines.len();
        self.lines.retain(|l| l.restaurant_id != restaurant_id);
        if self.lines.len() != before {
            self.persist();
        }
    }

    /// Replace a line's quantity; zero removes the line
    pub fn set_quantity(&mut self, item_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(item_id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity = quantity;
            self.persist();
        }
    }

    /// Empty the cart
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// Cart total in cents (exact integer arithmetic)
    pub fn total(&self) -> Cents {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Lines grouped per restaurant, groups in first-insertion order
    ///
    /// Checkout places one order per group.
    pub fn group_by_restaurant(&self) -> Vec<RestaurantGroup> {
        let mut groups: Vec<RestaurantGroup> = Vec::new();

        for line in &self.lines {
            match groups.iter_mut().find(|g| g.restaurant_id == line.restaurant_id) {
                Some(group) => group.lines.push(line.clone()),
                None => groups.push(RestaurantGroup {
                    restaurant_id: line.restaurant_id.clone(),
                    restaurant_name: line.restaurant_name.clone(),
                    lines: vec![line.clone()],
                }),
            }
        }

        groups
    }

    /// Persist the current line set, best-effort
    fn persist(&self) {
        let key = storage::cart_key(&self.identity);
        if let Err(e) = storage::save_typed(self.storage.as_ref(), &key, &self.lines) {
            tracing::warn!(identity = %self.identity, error = %e, "Cart persist failed, keeping in-memory state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn item(id: &str, price: Cents, restaurant: &str) -> CartItemInput {
        CartItemInput {
            item_id: id.to_string(),
            name: format!("Item {}", id),
            unit_price: price,
            restaurant_id: restaurant.to_string(),
            restaurant_name: format!("Restaurant {}", restaurant),
            image_ref: None,
        }
    }

    #[test]
    fn test_add_merges_same_item() {
        let storage = Arc::new(MemoryStorage::new());
        let mut cart = CartStore::new(Identity::Guest, storage);

        cart.add(item("x", 100, "r1"), 1);
        cart.add(item("x", 100, "r1"), 2);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.total(), 300);
    }

    #[test]
    fn test_total_and_zero_quantity_removal() {
        let storage = Arc::new(MemoryStorage::new());
        let mut cart = CartStore::new(Identity::Guest, Arc::clone(&storage) as Arc<dyn CacheStorage>);

        cart.add(item("x", 100, "r1"), 1);
        cart.add(item("y", 50, "r1"), 2);
        assert_eq!(cart.total(), 200);

        cart.set_quantity("x", 0);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].item_id, "y");

        cart.clear();
        assert!(cart.is_empty());

        // Persisted snapshot is empty too
        let persisted: Vec<CartLine> =
            storage::load_typed(storage.as_ref(), &storage::cart_key(&Identity::Guest))
                .unwrap()
                .unwrap();
        assert!(persisted.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let storage = Arc::new(MemoryStorage::new());
        let mut cart = CartStore::new(Identity::Guest, storage);

        cart.add(item("x", 100, "r1"), 1);
        cart.remove("missing");
        cart.set_quantity("missing", 5);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total(), 100);
    }

    #[test]
    fn test_add_saturates_quantity() {
        let storage = Arc::new(MemoryStorage::new());
        let mut cart = CartStore::new(Identity::Guest, storage);

        cart.add(item("x", 100, "r1"), u32::MAX);
        cart.add(item("x", 100, "r1"), 5);

        assert_eq!(cart.lines()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_remove_restaurant_drops_all_its_lines() {
        let storage = Arc::new(MemoryStorage::new());
        let mut cart = CartStore::new(Identity::Guest, Arc::clone(&storage) as Arc<dyn CacheStorage>);

        cart.add(item("a", 100, "r1"), 1);
        cart.add(item("b", 200, "r2"), 1);
        cart.add(item("c", 300, "r1"), 2);

        cart.remove_restaurant("r1");

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].item_id, "b");

        let persisted: Vec<CartLine> =
            storage::load_typed(storage.as_ref(), &storage::cart_key(&Identity::Guest))
                .unwrap()
                .unwrap();
        assert_eq!(persisted.len(), 1);
    }

    #[test]
    fn test_group_by_restaurant_insertion_order() {
        let storage = Arc::new(MemoryStorage::new());
        let mut cart = CartStore::new(Identity::Guest, storage);

        cart.add(item("a", 100, "r1"), 1);
        cart.add(item("b", 200, "r2"), 1);
        cart.add(item("c", 300, "r1"), 2);

        let groups = cart.group_by_restaurant();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].restaurant_id, "r1");
        assert_eq!(groups[0].lines.len(), 2);
        assert_eq!(groups[0].subtotal(), 700);
        assert_eq!(groups[1].restaurant_id, "r2");
        assert_eq!(groups[1].subtotal(), 200);
    }

    #[test]
    fn test_persist_restore_round_trip() {
        let storage: Arc<dyn CacheStorage> = Arc::new(MemoryStorage::new());

        let mut cart = CartStore::new(Identity::user("u1"), Arc::clone(&storage));
        cart.add(item("a", 150, "r1"), 2);
        cart.add(item("b", 75, "r2"), 1);
        let original = cart.lines().to_vec();

        let restored = CartStore::new(Identity::user("u1"), Arc::clone(&storage));
        assert_eq!(restored.lines(), original.as_slice());
        assert_eq!(
            restored
                .group_by_restaurant()
                .iter()
                .map(|g| g.restaurant_id.clone())
                .collect::<Vec<_>>(),
            vec!["r1".to_string(), "r2".to_string()]
        );
    }

    #[test]
    fn test_rejected_persist_keeps_memory_state() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_reject_writes(true);

        let mut cart = CartStore::new(Identity::Guest, Arc::clone(&storage) as Arc<dyn CacheStorage>);
        cart.add(item("x", 100, "r1"), 1);

        assert_eq!(cart.total(), 100);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let storage: Arc<dyn CacheStorage> = Arc::new(MemoryStorage::new());
        storage
            .save(&storage::cart_key(&Identity::Guest), &serde_json::json!("not-a-cart"))
            .unwrap();

        let cart = CartStore::new(Identity::Guest, storage);
        assert!(cart.is_empty());
    }
}
