//! Waiter - 注文を受けて order handler に渡す

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::domain::errors::CourierError;
use crate::domain::ids::OrderId;
use crate::domain::messages::OrderPlaced;
use crate::domain::order::Order;
use crate::ports::IdGenerator;
use crate::typed::HandlerRef;

/// Waiter は注文を書き取り、渡し先の Handler に `OrderPlaced` を渡す
///
/// 渡し先は `Handler<OrderPlaced>` なら何でもよい。広い型の Handler なら `widen` で包む:
/// ```ignore
/// let waiter = Waiter::new(printer.widen::<OrderPlaced>(), ids);
/// ```
pub struct Waiter {
    order_handler: HandlerRef<OrderPlaced>,
    ids: Arc<dyn IdGenerator>,
}

impl Waiter {
    pub fn new(order_handler: HandlerRef<OrderPlaced>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { order_handler, ids }
    }

    /// 新しい注文を作って渡し、その ID を返す
    ///
    /// 品名ごとに 1 行。order handler のエラーはそのまま返します。
    pub async fn place_new_order(
        &self,
        items: &BTreeMap<String, u32>,
    ) -> Result<OrderId, CourierError> {
        let order_id = self.ids.generate_order_id();
        let order = Order::from_items(order_id, items);
        info!(%order_id, line_items = order.line_items.len(), "waiter: placing new order");

        self.order_handler.handle(OrderPlaced::new(order)).await?;
        Ok(order_id)
    }
}
