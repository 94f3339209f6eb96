//! Order model: what the waiter writes down and the cashier settles.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::ids::OrderId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub item: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub line_items: Vec<LineItem>,
    pub is_paid: bool,
}

impl Order {
    pub fn new(order_id: OrderId, line_items: Vec<LineItem>) -> Self {
        Self {
            order_id,
            line_items,
            is_paid: false,
        }
    }

    /// 品名 → 数量 の対応から、1 品 1 行で注文を作る
    pub fn from_items(order_id: OrderId, items: &BTreeMap<String, u32>) -> Self {
        let line_items = items
            .iter()
            .map(|(item, quantity)| LineItem {
                item: item.clone(),
                quantity: *quantity,
            })
            .collect();
        Self::new(order_id, line_items)
    }
}

/// SharedOrder はメッセージが運ぶ、その場で書き換えられる注文
///
/// clone しても同じ注文を指します。独立したコピーが欲しいときは `snapshot()`。
#[derive(Debug, Clone)]
pub struct SharedOrder {
    order_id: OrderId,
    inner: Arc<Mutex<Order>>,
}

impl SharedOrder {
    pub fn new(order: Order) -> Self {
        Self {
            order_id: order.order_id,
            inner: Arc::new(Mutex::new(order)),
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub async fn snapshot(&self) -> Order {
        self.inner.lock().await.clone()
    }

    /// 支払い済みにして、その時点のスナップショットを返す
    ///
    /// 書き込みとスナップショットは同じロックの中で行います。
    pub async fn settle(&self) -> Order {
        let mut order = self.inner.lock().await;
        order.is_paid = true;
        order.clone()
    }

    pub async fn update<R>(&self, f: impl FnOnce(&mut Order) -> R) -> R {
        let mut order = self.inner.lock().await;
        f(&mut *order)
    }
}
