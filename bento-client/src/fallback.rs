//! Fallback sample orders
//!
//! A fixed, deterministic order set shown only when the backend is
//! unreachable and no cached data exists. It gives the history view
//! realistic content instead of an empty screen, and is never written
//! to persisted storage.

use shared::order::{ContactInfo, DeliveryAddress, Order, OrderItem, OrderStatus};

/// Prefix identifying non-authoritative sample orders
pub const SAMPLE_ID_PREFIX: &str = "sample-";

/// The static sample order set
pub fn sample_orders() -> Vec<Order> {
    vec![
        Order {
            order_id: format!("{}001", SAMPLE_ID_PREFIX),
            order_number: "SAMPLE-1001".to_string(),
            status: OrderStatus::Delivered,
            items: vec![
                OrderItem {
                    name: "Margherita Pizza".to_string(),
                    quantity: 1,
                    unit_price: 1250,
                },
                OrderItem {
                    name: "Garlic Bread".to_string(),
                    quantity: 2,
                    unit_price: 350,
                },
            ],
            subtotal: 1950,
            delivery_fee: 300,
            tax: 195,
            donation: Some(100),
            discount: 0,
            total: 2545,
            created_at: 1_704_067_200_000, // 2024-01-01T00:00:00Z
            restaurant_ref: "sample-restaurant-1".to_string(),
            delivery_address: DeliveryAddress {
                street: "1 Sample Street".to_string(),
                city: "Sampleville".to_string(),
                postal_code: "00001".to_string(),
                note: None,
            },
            contact_info: ContactInfo {
                name: "Sample Customer".to_string(),
                phone: "000-000-0000".to_string(),
                email: None,
            },
        },
        Order {
            order_id: format!("{}002", SAMPLE_ID_PREFIX),
            order_number: "SAMPLE-1002".to_string(),
            status: OrderStatus::OutForDelivery,
            items: vec![OrderItem {
                name: "Veggie Bento Box".to_string(),
                quantity: 2,
                unit_price: 899,
            }],
            subtotal: 1798,
            delivery_fee: 250,
            tax: 180,
            donation: None,
            discount: 200,
            total: 2028,
            created_at: 1_704_153_600_000, // 2024-01-02T00:00:00Z
            restaurant_ref: "sample-restaurant-2".to_string(),
            delivery_address: DeliveryAddress {
                street: "2 Sample Avenue".to_string(),
                city: "Sampleville".to_string(),
                postal_code: "00001".to_string(),
                note: Some("Leave at the door".to_string()),
            },
            contact_info: ContactInfo {
                name: "Sample Customer".to_string(),
                phone: "000-000-0000".to_string(),
                email: None,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_set_is_deterministic() {
        assert_eq!(sample_orders(), sample_orders());
    }

    #[test]
    fn test_sample_orders_are_marked_and_consistent() {
        let orders = sample_orders();
        assert!(!orders.is_empty());

        for order in &orders {
            assert!(order.order_id.starts_with(SAMPLE_ID_PREFIX));
            assert!(order.is_total_consistent(), "{} total inconsistent", order.order_id);
        }
    }
}
