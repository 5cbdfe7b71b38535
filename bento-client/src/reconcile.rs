//! Order set reconciliation
//!
//! Pure merge of the locally cached order set with a freshly fetched
//! remote set. The remote record is authoritative on id collision (it
//! carries the freshest status); local-only orders are preserved because
//! they may have been placed or cached while the upstream list lagged.

use std::collections::HashSet;

use shared::Order;

/// Merge a local order set with a remote one
///
/// Starts from `remote`, then appends every `local` order whose id is
/// absent from `remote`. Idempotent: `merge(x, x) == x`.
pub fn merge(local: &[Order], remote: &[Order]) -> Vec<Order> {
    let remote_ids: HashSet<&str> = remote.iter().map(|o| o.order_id.as_str()).collect();

    let mut merged: Vec<Order> = remote.to_vec();
    merged.extend(
        local
            .iter()
            .filter(|o| !remote_ids.contains(o.order_id.as_str()))
            .cloned(),
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{ContactInfo, DeliveryAddress, OrderStatus};

    fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            order_id: id.to_string(),
            order_number: format!("BN-{}", id),
            status,
            items: vec![],
            subtotal: 1000,
            delivery_fee: 200,
            tax: 100,
            donation: None,
            discount: 0,
            total: 1300,
            created_at: 1_705_900_000_000,
            restaurant_ref: "r1".to_string(),
            delivery_address: DeliveryAddress::default(),
            contact_info: ContactInfo::default(),
        }
    }

    #[test]
    fn test_remote_wins_on_collision_and_local_preserved() {
        let local = vec![
            order("a", OrderStatus::Pending),
            order("b", OrderStatus::Processing),
        ];
        let remote = vec![order("b", OrderStatus::Delivered), order("c", OrderStatus::Pending)];

        let merged = merge(&local, &remote);

        assert_eq!(merged.len(), 3);
        let b = merged.iter().find(|o| o.order_id == "b").unwrap();
        assert_eq!(b.status, OrderStatus::Delivered);
        assert!(merged.iter().any(|o| o.order_id == "a"));
        assert!(merged.iter().any(|o| o.order_id == "c"));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let set = vec![order("a", OrderStatus::Pending), order("b", OrderStatus::Delivered)];
        assert_eq!(merge(&set, &set), set);
    }

    #[test]
    fn test_empty_sides() {
        let set = vec![order("a", OrderStatus::Pending)];
        assert_eq!(merge(&[], &set), set);
        assert_eq!(merge(&set, &[]), set);
        assert!(merge(&[], &[]).is_empty());
    }
}
