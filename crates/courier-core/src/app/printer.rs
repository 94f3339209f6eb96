//! OrderPrinter - 注文イベントの出力先

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::CourierError;
use crate::domain::messages::OrderEvent;
use crate::ports::Horn;
use crate::typed::{Handler, Message};

/// OrderPrinter は全ての `OrderEvent` をアナウンスする
///
/// 一番広い型の Handler なので、具体的な型の購読には `widen` で包んで登録します。
pub struct OrderPrinter {
    horn: Arc<dyn Horn>,
}

impl OrderPrinter {
    pub fn new(horn: Arc<dyn Horn>) -> Self {
        Self { horn }
    }
}

#[async_trait]
impl Handler<OrderEvent> for OrderPrinter {
    async fn handle(&self, message: OrderEvent) -> Result<(), CourierError> {
        self.horn.say(&format!(
            "[printer]: {} for {}.",
            message.kind(),
            message.order_id()
        ));
        Ok(())
    }
}

impl std::fmt::Debug for OrderPrinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OrderPrinter")
    }
}
