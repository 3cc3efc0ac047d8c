//! Macro-generated test suite for `OrderStore` contract validation.
//!
//! The `order_store_tests!` macro generates a test module that validates any
//! `OrderStore` implementation against the full contract: initialization,
//! CRUD, id assignment, no-op semantics for unknown ids, and concurrent
//! access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//!
//! order_store_tests!(fresh_in_memory_store().await);
//! ```
//!
//! `$factory` must evaluate to a fresh, initialized store implementing
//! `OrderStore + Clone + 'static`. It is re-evaluated for each test.

#[macro_export]
macro_rules! order_store_tests {
    ($factory:expr) => {
        mod order_store_contract_tests {
            use super::*;
            use bakery::core::{CakeType, Order, OrderId, OrderStatus, OrderStore};
            use rust_decimal_macros::dec;

            // ==================================================================
            // Initialization
            // ==================================================================

            #[tokio::test]
            async fn test_initialize_twice_keeps_orders() {
                let store = $factory;
                let id = store.create(ana_order()).await.unwrap();

                store.initialize().await.unwrap();
                store.initialize().await.unwrap();

                let all = store.list_all().await.unwrap();
                assert_eq!(all.len(), 1, "Re-initializing must not lose orders");
                assert_eq!(all[0].id, id);
            }

            // ==================================================================
            // Create & list
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_list_round_trip() {
                let store = $factory;

                let id = store.create(ana_order()).await.unwrap();
                assert_eq!(id, OrderId(1));

                let all = store.list_all().await.unwrap();
                assert_eq!(
                    all,
                    vec![Order {
                        id: OrderId(1),
                        customer_name: "Ana".to_string(),
                        cake_type: CakeType::Chocolate,
                        quantity: 2,
                        price: dec!(45.00),
                        delivery_date: date(2025, 6, 1),
                        notes: Some("sem açúcar".to_string()),
                        status: OrderStatus::InProgress,
                    }]
                );
                assert_eq!(all[0].price.to_string(), "45.00");
            }

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;

                let all = store.list_all().await.unwrap();
                assert!(all.is_empty(), "List on empty store should return empty vec");
            }

            #[tokio::test]
            async fn test_list_is_in_id_order() {
                let store = $factory;
                let mut created = Vec::new();

                for order in sample_batch(6) {
                    created.push(store.create(order).await.unwrap());
                }

                let all = store.list_all().await.unwrap();
                let ids: Vec<OrderId> = all.iter().map(|o| o.id).collect();
                assert_eq!(ids, created, "List should return orders by ascending id");
                assert!(ids.windows(2).all(|w| w[0] < w[1]));
            }

            #[tokio::test]
            async fn test_create_preserves_every_field() {
                let store = $factory;
                let batch = sample_batch(5);

                for order in batch.clone() {
                    store.create(order).await.unwrap();
                }

                let all = store.list_all().await.unwrap();
                assert_eq!(all.len(), batch.len());
                for (stored, input) in all.iter().zip(batch.iter()) {
                    assert_eq!(stored.customer_name, input.customer_name);
                    assert_eq!(stored.cake_type, input.cake_type);
                    assert_eq!(stored.quantity, input.quantity);
                    assert_eq!(stored.price, input.price);
                    assert_eq!(stored.delivery_date, input.delivery_date);
                    assert_eq!(stored.notes, input.notes);
                    assert_eq!(stored.status, OrderStatus::InProgress);
                }
            }

            #[tokio::test]
            async fn test_create_does_not_validate_content() {
                let store = $factory;
                let order = create_test_order("", CakeType::Other, -3, dec!(-12.50));

                let id = store.create(order).await.unwrap();

                let stored = store.get(id).await.unwrap().unwrap();
                assert_eq!(stored.customer_name, "");
                assert_eq!(stored.quantity, -3);
                assert_eq!(stored.price, dec!(-12.50));
            }

            #[tokio::test]
            async fn test_price_rounded_to_cents() {
                let store = $factory;
                let order = create_test_order("Carla", CakeType::Carrot, 1, dec!(10.005));

                let id = store.create(order).await.unwrap();

                let stored = store.get(id).await.unwrap().unwrap();
                assert_eq!(stored.price.to_string(), "10.01");
            }

            #[tokio::test]
            async fn test_unstorable_price_is_rejected() {
                let store = $factory;
                let order = create_test_order("Edu", CakeType::Other, 1, rust_decimal::Decimal::MAX);

                let err = store.create(order).await.unwrap_err();
                match err {
                    bakery::core::BakeryError::Validation(ref validation) => {
                        assert_eq!(validation.fields(), vec!["price"]);
                    }
                    other => panic!("Expected a price validation error, got {:?}", other),
                }
                assert!(store.list_all().await.unwrap().is_empty());

                let id = store.create(ana_order()).await.unwrap();
                let mut update = store.get(id).await.unwrap().unwrap().to_update();
                update.price = rust_decimal::Decimal::MAX;
                assert!(store.update(id, update).await.is_err());

                let stored = store.get(id).await.unwrap().unwrap();
                assert_eq!(stored.price, dec!(45.00));

                let report = store.report().await.unwrap();
                assert_eq!(report.booked_total, dec!(45.00));
            }

            #[tokio::test]
            async fn test_absent_notes_round_trip() {
                let store = $factory;
                let order = create_test_order("Duda", CakeType::Vanilla, 1, dec!(35));

                let id = store.create(order).await.unwrap();

                let stored = store.get(id).await.unwrap().unwrap();
                assert_eq!(stored.notes, None);
            }

            // ==================================================================
            // Get
            // ==================================================================

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory;
                store.create(ana_order()).await.unwrap();

                let result = store.get(OrderId(404)).await.unwrap();
                assert!(result.is_none(), "Getting a nonexistent order should return None");
            }

            // ==================================================================
            // Update
            // ==================================================================

            #[tokio::test]
            async fn test_update_second_of_two() {
                let store = $factory;
                let first = store.create(ana_order()).await.unwrap();
                let second = store
                    .create(create_test_order("Bia", CakeType::Vanilla, 1, dec!(30)))
                    .await
                    .unwrap();
                assert_eq!((first, second), (OrderId(1), OrderId(2)));

                let before = store.get(first).await.unwrap().unwrap();
                let touched = store
                    .update(second, full_update(OrderStatus::Delivered))
                    .await
                    .unwrap();
                assert!(touched);

                let all = store.list_all().await.unwrap();
                assert_eq!(all.len(), 2);
                assert_eq!(all[0], before, "Order 1 must be unchanged");

                let updated = &all[1];
                assert_eq!(updated.id, second);
                assert_eq!(updated.customer_name, "Beatriz");
                assert_eq!(updated.cake_type, CakeType::RedVelvet);
                assert_eq!(updated.quantity, 5);
                assert_eq!(updated.price, dec!(210.90));
                assert_eq!(updated.delivery_date, date(2025, 8, 20));
                assert_eq!(updated.notes.as_deref(), Some("entregar às 15h"));
                assert_eq!(updated.status, OrderStatus::Delivered);
            }

            #[tokio::test]
            async fn test_update_nonexistent_is_noop() {
                let store = $factory;
                store.create(ana_order()).await.unwrap();
                let before = store.list_all().await.unwrap();

                let touched = store
                    .update(OrderId(99), full_update(OrderStatus::Cancelled))
                    .await
                    .unwrap();
                assert!(!touched, "Updating a nonexistent order touches nothing");

                assert_eq!(store.list_all().await.unwrap(), before);
            }

            #[tokio::test]
            async fn test_status_moves_freely() {
                let store = $factory;
                let id = store.create(ana_order()).await.unwrap();

                for status in [
                    OrderStatus::Cancelled,
                    OrderStatus::InProgress,
                    OrderStatus::Delivered,
                    OrderStatus::InProgress,
                ] {
                    let mut update = store.get(id).await.unwrap().unwrap().to_update();
                    update.status = status;
                    assert!(store.update(id, update).await.unwrap());

                    let stored = store.get(id).await.unwrap().unwrap();
                    assert_eq!(stored.status, status);
                }
            }

            #[tokio::test]
            async fn test_update_can_clear_notes() {
                let store = $factory;
                let id = store.create(ana_order()).await.unwrap();

                let mut update = store.get(id).await.unwrap().unwrap().to_update();
                update.notes = None;
                store.update(id, update).await.unwrap();

                let stored = store.get(id).await.unwrap().unwrap();
                assert_eq!(stored.notes, None);
                assert_eq!(stored.customer_name, "Ana");
            }

            // ==================================================================
            // Delete
            // ==================================================================

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $factory;
                let keep = store.create(ana_order()).await.unwrap();
                let gone = store
                    .create(create_test_order("Bia", CakeType::Vanilla, 1, dec!(30)))
                    .await
                    .unwrap();

                assert!(store.delete(gone).await.unwrap());

                let all = store.list_all().await.unwrap();
                assert_eq!(all.len(), 1);
                assert_eq!(all[0].id, keep);
                assert!(store.get(gone).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_nonexistent_is_noop() {
                let store = $factory;
                store.create(ana_order()).await.unwrap();

                assert!(!store.delete(OrderId(42)).await.unwrap());
                assert_eq!(store.list_all().await.unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_count_tracks_creates_minus_deletes() {
                let store = $factory;
                let mut ids = Vec::new();
                for order in sample_batch(5) {
                    ids.push(store.create(order).await.unwrap());
                }

                store.delete(ids[1]).await.unwrap();
                store.delete(ids[3]).await.unwrap();
                // Second delete of the same id removes nothing
                assert!(!store.delete(ids[3]).await.unwrap());

                let all = store.list_all().await.unwrap();
                assert_eq!(all.len(), 3);
                let remaining: Vec<OrderId> = all.iter().map(|o| o.id).collect();
                assert_eq!(remaining, vec![ids[0], ids[2], ids[4]]);
            }

            #[tokio::test]
            async fn test_ids_not_reused_after_deleting_highest() {
                let store = $factory;
                store.create(ana_order()).await.unwrap();
                let highest = store.create(ana_order()).await.unwrap();

                store.delete(highest).await.unwrap();
                let next = store.create(ana_order()).await.unwrap();

                assert!(next > highest, "Id {} was reused", next);
            }

            // ==================================================================
            // Report
            // ==================================================================

            #[tokio::test]
            async fn test_report_reflects_contents() {
                let store = $factory;
                let first = store.create(ana_order()).await.unwrap();
                store
                    .create(create_test_order("Bia", CakeType::Vanilla, 3, dec!(90)))
                    .await
                    .unwrap();
                store
                    .update(first, full_update(OrderStatus::Cancelled))
                    .await
                    .unwrap();

                let report = store.report().await.unwrap();
                assert_eq!(report.rows.len(), 2);

                let cancelled = report.summary(OrderStatus::Cancelled).unwrap();
                assert_eq!(cancelled.orders, 1);
                assert_eq!(cancelled.total_price, dec!(210.90));

                let in_progress = report.summary(OrderStatus::InProgress).unwrap();
                assert_eq!(in_progress.cakes, 3);
                assert_eq!(report.booked_total, dec!(90.00));
            }

            // ==================================================================
            // Concurrent access
            // ==================================================================

            /// Concurrent creates from spawned tasks.
            ///
            /// Requires the store to be `Clone + Send + 'static`.
            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn test_concurrent_creates() {
                let store = $factory;
                let s1 = store.clone();
                let s2 = store.clone();

                let h1 = tokio::spawn(async move {
                    s1.create(create_test_order("Concurrent_A", CakeType::Carrot, 1, dec!(20)))
                        .await
                });
                let h2 = tokio::spawn(async move {
                    s2.create(create_test_order("Concurrent_B", CakeType::Other, 2, dec!(40)))
                        .await
                });

                let (r1, r2) = tokio::time::timeout(std::time::Duration::from_secs(30), async {
                    tokio::try_join!(h1, h2).unwrap()
                })
                .await
                .expect("Concurrent creates timed out after 30s");

                let id1 = r1.unwrap();
                let id2 = r2.unwrap();
                assert_ne!(id1, id2, "Each create gets its own id");

                let all = store.list_all().await.unwrap();
                assert_eq!(all.len(), 2, "Both concurrently created orders should be present");
            }
        }
    };
}
