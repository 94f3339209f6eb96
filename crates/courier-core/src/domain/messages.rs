//! Restaurant messages - レストランのメッセージ階層
//!
//! ```text
//! OrderEvent
//! ├── OrderPlaced
//! └── PaymentEvent
//!     ├── TakePayment
//!     └── OrderPaid
//! ```
//!
//! 広い型は enum、葉は struct。`Upcast` は祖先すべてへ、`Downcast` は子孫すべてへ実装します。

use crate::typed::{Downcast, Message, Upcast};

use super::ids::OrderId;
use super::order::{Order, SharedOrder};

/// Waiter が注文を受けた
#[derive(Debug, Clone)]
pub struct OrderPlaced {
    pub order: SharedOrder,
}

/// 支払いを受け取ってほしい
#[derive(Debug, Clone)]
pub struct TakePayment {
    pub order: SharedOrder,
}

/// 支払い済み
///
/// `order` は支払い直後のスナップショット。元の注文がその後変わっても影響を受けません。
#[derive(Debug, Clone)]
pub struct OrderPaid {
    pub request: TakePayment,
    pub order: Order,
}

#[derive(Debug, Clone)]
pub enum PaymentEvent {
    Requested(TakePayment),
    Completed(OrderPaid),
}

#[derive(Debug, Clone)]
pub enum OrderEvent {
    Placed(OrderPlaced),
    Payment(PaymentEvent),
}

impl OrderPlaced {
    pub fn new(order: Order) -> Self {
        Self {
            order: SharedOrder::new(order),
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order.order_id()
    }
}

impl TakePayment {
    pub fn new(order: SharedOrder) -> Self {
        Self { order }
    }

    pub fn order_id(&self) -> OrderId {
        self.order.order_id()
    }
}

impl OrderPaid {
    pub fn order_id(&self) -> OrderId {
        self.order.order_id
    }
}

impl PaymentEvent {
    pub fn order_id(&self) -> OrderId {
        match self {
            PaymentEvent::Requested(m) => m.order_id(),
            PaymentEvent::Completed(m) => m.order_id(),
        }
    }
}

impl OrderEvent {
    pub fn order_id(&self) -> OrderId {
        match self {
            OrderEvent::Placed(m) => m.order_id(),
            OrderEvent::Payment(m) => m.order_id(),
        }
    }
}

impl Message for OrderPlaced {}

impl Message for TakePayment {}

impl Message for OrderPaid {}

impl Message for PaymentEvent {
    fn kind(&self) -> &'static str {
        match self {
            PaymentEvent::Requested(m) => m.kind(),
            PaymentEvent::Completed(m) => m.kind(),
        }
    }
}

impl Message for OrderEvent {
    fn kind(&self) -> &'static str {
        match self {
            OrderEvent::Placed(m) => m.kind(),
            OrderEvent::Payment(m) => m.kind(),
        }
    }
}

// ========================================
// Upcast（is-a）
// ========================================

impl Upcast<PaymentEvent> for TakePayment {
    fn upcast(self) -> PaymentEvent {
        PaymentEvent::Requested(self)
    }
}

impl Upcast<PaymentEvent> for OrderPaid {
    fn upcast(self) -> PaymentEvent {
        PaymentEvent::Completed(self)
    }
}

impl Upcast<OrderEvent> for OrderPlaced {
    fn upcast(self) -> OrderEvent {
        OrderEvent::Placed(self)
    }
}

impl Upcast<OrderEvent> for PaymentEvent {
    fn upcast(self) -> OrderEvent {
        OrderEvent::Payment(self)
    }
}

impl Upcast<OrderEvent> for TakePayment {
    fn upcast(self) -> OrderEvent {
        OrderEvent::Payment(PaymentEvent::Requested(self))
    }
}

impl Upcast<OrderEvent> for OrderPaid {
    fn upcast(self) -> OrderEvent {
        OrderEvent::Payment(PaymentEvent::Completed(self))
    }
}

// ========================================
// Downcast（may-be-a）
// ========================================

impl Downcast<TakePayment> for PaymentEvent {
    fn downcast(self) -> Result<TakePayment, Self> {
        match self {
            PaymentEvent::Requested(m) => Ok(m),
            other => Err(other),
        }
    }
}

impl Downcast<OrderPaid> for PaymentEvent {
    fn downcast(self) -> Result<OrderPaid, Self> {
        match self {
            PaymentEvent::Completed(m) => Ok(m),
            other => Err(other),
        }
    }
}

impl Downcast<OrderPlaced> for OrderEvent {
    fn downcast(self) -> Result<OrderPlaced, Self> {
        match self {
            OrderEvent::Placed(m) => Ok(m),
            other => Err(other),
        }
    }
}

impl Downcast<PaymentEvent> for OrderEvent {
    fn downcast(self) -> Result<PaymentEvent, Self> {
        match self {
            OrderEvent::Payment(m) => Ok(m),
            other => Err(other),
        }
    }
}

impl Downcast<TakePayment> for OrderEvent {
    fn downcast(self) -> Result<TakePayment, Self> {
        match self {
            OrderEvent::Payment(PaymentEvent::Requested(m)) => Ok(m),
            other => Err(other),
        }
    }
}

impl Downcast<OrderPaid> for OrderEvent {
    fn downcast(self) -> Result<OrderPaid, Self> {
        match self {
            OrderEvent::Payment(PaymentEvent::Completed(m)) => Ok(m),
            other => Err(other),
        }
    }
}
