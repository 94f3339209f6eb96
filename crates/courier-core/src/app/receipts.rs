//! Receipts - 支払い済み注文の控え

use std::fmt;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::errors::CourierError;
use crate::domain::messages::OrderPaid;
use crate::domain::order::Order;
use crate::typed::Handler;

/// Receipts は `OrderPaid` のスナップショットを受け取った順に貯める
#[derive(Default)]
pub struct Receipts {
    orders: Mutex<Vec<Order>>,
}

impl Receipts {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.orders.lock().await.clone()
    }
}

impl fmt::Debug for Receipts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Receipts")
    }
}

#[async_trait]
impl Handler<OrderPaid> for Receipts {
    async fn handle(&self, message: OrderPaid) -> Result<(), CourierError> {
        self.orders.lock().await.push(message.order);
        Ok(())
    }
}
