// bento-client/tests/cart_persistence.rs
// Cart persistence against the file-backed storage

use std::sync::Arc;

use bento_client::storage::{self, CacheStorage};
use bento_client::{CartStore, FileStorage};
use shared::{CartItemInput, CartLine, Identity};
use tempfile::TempDir;

fn item(id: &str, price: i64, restaurant: &str) -> CartItemInput {
    CartItemInput {
        item_id: id.to_string(),
        name: format!("Item {}", id),
        unit_price: price,
        restaurant_id: restaurant.to_string(),
        restaurant_name: format!("Restaurant {}", restaurant),
        image_ref: Some(format!("images/{}.jpg", id)),
    }
}

#[test]
fn test_file_round_trip_preserves_lines_and_grouping() {
    let temp_dir = TempDir::new().unwrap();
    let storage: Arc<dyn CacheStorage> = Arc::new(FileStorage::new(temp_dir.path()));

    let mut cart = CartStore::new(Identity::user("u1"), Arc::clone(&storage));
    cart.add(item("noodles", 1250, "r1"), 1);
    cart.add(item("rice", 450, "r2"), 2);
    cart.add(item("soup", 600, "r1"), 1);
    let original = cart.lines().to_vec();

    // A fresh store over the same directory sees the identical set
    let restored = CartStore::new(Identity::user("u1"), Arc::clone(&storage));
    assert_eq!(restored.lines(), original.as_slice());
    assert_eq!(restored.total(), 1250 + 900 + 600);

    let groups = restored.group_by_restaurant();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].restaurant_id, "r1");
    assert_eq!(groups[0].lines[0].item_id, "noodles");
    assert_eq!(groups[0].lines[1].item_id, "soup");
    assert_eq!(groups[1].restaurant_id, "r2");
}

#[test]
fn test_missing_and_corrupt_files_start_empty() {
    let temp_dir = TempDir::new().unwrap();
    let storage: Arc<dyn CacheStorage> = Arc::new(FileStorage::new(temp_dir.path()));

    // First run: no file at all
    let cart = CartStore::new(Identity::Guest, Arc::clone(&storage));
    assert!(cart.is_empty());

    // Corrupt file: falls back to empty instead of erroring
    std::fs::write(temp_dir.path().join("cart_guest.json"), "{ not json").unwrap();
    let cart = CartStore::new(Identity::Guest, Arc::clone(&storage));
    assert!(cart.is_empty());
}

#[test]
fn test_carts_are_isolated_per_identity() {
    let temp_dir = TempDir::new().unwrap();
    let storage: Arc<dyn CacheStorage> = Arc::new(FileStorage::new(temp_dir.path()));

    let mut guest_cart = CartStore::new(Identity::Guest, Arc::clone(&storage));
    guest_cart.add(item("noodles", 1250, "r1"), 1);

    let u1_cart = CartStore::new(Identity::user("u1"), Arc::clone(&storage));
    assert!(u1_cart.is_empty());

    let persisted: Option<Vec<CartLine>> =
        storage::load_typed(storage.as_ref(), &storage::cart_key(&Identity::user("u1"))).unwrap();
    assert!(persisted.is_none());
}
