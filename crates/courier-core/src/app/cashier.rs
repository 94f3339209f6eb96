//! Cashier - 支払いを受け取る

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::CourierError;
use crate::domain::messages::{OrderPaid, TakePayment};
use crate::ports::{Horn, Publisher};
use crate::typed::Handler;

/// Cashier は `TakePayment` だけを扱う Handler
///
/// 支払いの流れ:
/// 1. horn で「支払い受付中」をアナウンス
/// 2. 設定された時間だけ待つ（処理時間の模擬）
/// 3. 注文を支払い済みにし、同じロックの中でスナップショットを取る
/// 4. horn で「支払い完了」をアナウンス
/// 5. 元の依頼とそのスナップショットを持つ `OrderPaid` を publish
///
/// 広い型（`PaymentEvent` など）で購読させるときは `narrow_strict` で包みます。
pub struct Cashier<P> {
    publisher: Arc<P>,
    horn: Arc<dyn Horn>,
    payment_delay: Duration,
}

impl<P: Publisher> Cashier<P> {
    pub fn new(publisher: Arc<P>, horn: Arc<dyn Horn>, payment_delay: Duration) -> Self {
        Self {
            publisher,
            horn,
            payment_delay,
        }
    }
}

#[async_trait]
impl<P: Publisher + 'static> Handler<TakePayment> for Cashier<P> {
    async fn handle(&self, message: TakePayment) -> Result<(), CourierError> {
        let order_id = message.order_id();
        self.horn
            .say(&format!("[cashier]: taking payment for {order_id}."));

        tokio::time::sleep(self.payment_delay).await;
        let snapshot = message.order.settle().await;

        self.horn.say(&format!("[cashier]: took payment for {order_id}."));

        debug!(%order_id, "publishing OrderPaid");
        self.publisher
            .publish(OrderPaid {
                request: message,
                order: snapshot,
            })
            .await
    }
}

impl<P> fmt::Debug for Cashier<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Cashier")
    }
}
