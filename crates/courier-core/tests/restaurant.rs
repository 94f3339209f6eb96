//! End-to-end restaurant scenario over the public API.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use courier_core::app::{CashierConfig, Restaurant, RestaurantBuilder, RestaurantConfig};
use courier_core::domain::{
    CourierError, LineItem, OrderEvent, OrderPaid, OrderPlaced, PaymentEvent, TakePayment,
};
use courier_core::impls::RecordingHorn;
use courier_core::ports::Publisher;
use courier_core::typed::{Handler, HandlerRef};

fn fast_config() -> RestaurantConfig {
    RestaurantConfig {
        cashier: CashierConfig {
            payment_delay_ms: 1,
        },
        ..RestaurantConfig::default()
    }
}

async fn restaurant() -> Restaurant {
    RestaurantBuilder::new(fast_config())
        .expect::<OrderPlaced>()
        .expect::<PaymentEvent>()
        .expect::<OrderPaid>()
        .build()
        .await
        .unwrap()
}

fn burger_and_fries() -> BTreeMap<String, u32> {
    BTreeMap::from([("burger".to_string(), 2), ("fries".to_string(), 1)])
}

/// 受け取った OrderPaid をそのまま持っておく
#[derive(Debug, Default)]
struct KeepPaid {
    paid: Mutex<Vec<OrderPaid>>,
}

#[async_trait]
impl Handler<OrderPaid> for KeepPaid {
    async fn handle(&self, message: OrderPaid) -> Result<(), CourierError> {
        self.paid.lock().unwrap().push(message);
        Ok(())
    }
}

#[tokio::test]
async fn placing_an_order_ends_with_a_paid_receipt() {
    let restaurant = restaurant().await;

    let order_id = restaurant
        .waiter
        .place_new_order(&burger_and_fries())
        .await
        .unwrap();

    let receipts = restaurant.receipts.orders().await;
    assert_eq!(receipts.len(), 1);
    let receipt = &receipts[0];
    assert_eq!(receipt.order_id, order_id);
    assert!(receipt.is_paid);
    assert_eq!(
        receipt.line_items,
        vec![
            LineItem {
                item: "burger".to_string(),
                quantity: 2
            },
            LineItem {
                item: "fries".to_string(),
                quantity: 1
            },
        ]
    );
}

#[tokio::test]
async fn every_order_gets_a_fresh_id() {
    let restaurant = restaurant().await;
    let items = burger_and_fries();

    let first = restaurant.waiter.place_new_order(&items).await.unwrap();
    let second = restaurant.waiter.place_new_order(&items).await.unwrap();

    assert_ne!(first, second);
    assert_eq!(restaurant.receipts.orders().await.len(), 2);
}

#[tokio::test]
async fn paid_snapshot_ignores_later_changes_to_the_order() {
    let restaurant = restaurant().await;
    let keep = Arc::new(KeepPaid::default());
    restaurant
        .bus
        .subscribe::<OrderPaid>(HandlerRef::from_shared(keep.clone()))
        .await;

    restaurant
        .waiter
        .place_new_order(&burger_and_fries())
        .await
        .unwrap();

    let paid = keep.paid.lock().unwrap().remove(0);
    paid.request
        .order
        .update(|order| {
            order.is_paid = false;
            order.line_items.clear();
        })
        .await;

    assert!(paid.order.is_paid);
    assert_eq!(paid.order.line_items.len(), 2);
    assert!(!paid.request.order.snapshot().await.is_paid);
}

#[tokio::test]
async fn announcements_follow_the_order_through_the_restaurant() {
    let horn = Arc::new(RecordingHorn::new());
    let restaurant = RestaurantBuilder::new(fast_config())
        .with_horn(horn.clone())
        .build()
        .await
        .unwrap();

    let order_id = restaurant
        .waiter
        .place_new_order(&burger_and_fries())
        .await
        .unwrap();

    let lines = horn.lines();
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|line| line.contains(&order_id.to_string())));
    assert!(lines[2].starts_with("[cashier]: taking payment"));
    assert!(lines[3].starts_with("[cashier]: took payment"));
}

#[tokio::test]
async fn strict_cashier_route_rejects_a_completed_payment() {
    let restaurant = restaurant().await;
    restaurant
        .waiter
        .place_new_order(&burger_and_fries())
        .await
        .unwrap();
    let paid = restaurant.receipts.orders().await.remove(0);
    let request = TakePayment::new(courier_core::domain::SharedOrder::new(paid.clone()));

    let err = restaurant
        .bus
        .publish(PaymentEvent::Completed(OrderPaid {
            request,
            order: paid,
        }))
        .await
        .unwrap_err();

    match err {
        CourierError::TypeMismatch {
            expected, actual, ..
        } => {
            assert_eq!(expected, "TakePayment");
            assert_eq!(actual, "OrderPaid");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn wrapped_and_plain_handlers_are_the_same_registrant() {
    let restaurant = restaurant().await;
    let printer: &HandlerRef<OrderEvent> = &restaurant.printer;

    assert!(
        !restaurant
            .bus
            .subscribe::<OrderPlaced>(printer.widen())
            .await
    );
    assert!(
        restaurant
            .bus
            .unsubscribe::<PaymentEvent, _>(printer)
            .await
    );
    assert!(
        restaurant
            .bus
            .unsubscribe::<PaymentEvent, _>(&restaurant.cashier)
            .await
    );
    assert_eq!(restaurant.bus.subscribers::<PaymentEvent>().await.len(), 0);
}
