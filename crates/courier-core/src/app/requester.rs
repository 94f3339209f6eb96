//! PaymentRequester - 注文ごとに支払いを依頼する

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::CourierError;
use crate::domain::messages::{OrderPlaced, PaymentEvent, TakePayment};
use crate::ports::Publisher;
use crate::typed::{Handler, Upcast};

/// PaymentRequester は `OrderPlaced` を受けて、`PaymentEvent` として支払い依頼を publish する
///
/// `PaymentEvent` の購読者（narrow した Cashier など）が依頼を受け取ります。
pub struct PaymentRequester<P> {
    publisher: Arc<P>,
}

impl<P: Publisher> PaymentRequester<P> {
    pub fn new(publisher: Arc<P>) -> Self {
        Self { publisher }
    }
}

#[async_trait]
impl<P: Publisher + 'static> Handler<OrderPlaced> for PaymentRequester<P> {
    async fn handle(&self, message: OrderPlaced) -> Result<(), CourierError> {
        let request: PaymentEvent = TakePayment::new(message.order).upcast();
        self.publisher.publish(request).await
    }
}

impl<P> fmt::Debug for PaymentRequester<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PaymentRequester")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::OrderId;
    use crate::domain::order::Order;
    use crate::impls::InMemoryBus;
    use crate::typed::HandlerRef;
    use std::sync::Mutex;
    use ulid::Ulid;

    #[derive(Debug, Default)]
    struct Requests {
        seen: Mutex<Vec<OrderId>>,
    }

    #[async_trait]
    impl Handler<TakePayment> for Requests {
        async fn handle(&self, message: TakePayment) -> Result<(), CourierError> {
            self.seen.lock().unwrap().push(message.order_id());
            Ok(())
        }
    }

    #[tokio::test]
    async fn publishes_a_payment_request_per_order() {
        let bus = Arc::new(InMemoryBus::new());
        let requests = Arc::new(Requests::default());
        bus.subscribe::<PaymentEvent>(
            HandlerRef::<TakePayment>::from_shared(requests.clone()).narrow_strict(),
        )
        .await;

        let requester = HandlerRef::new(PaymentRequester::new(bus.clone()));
        let placed = OrderPlaced::new(Order::new(OrderId::from_ulid(Ulid::new()), vec![]));
        let order_id = placed.order_id();

        requester.handle(placed).await.unwrap();

        assert_eq!(*requests.seen.lock().unwrap(), vec![order_id]);
    }
}
