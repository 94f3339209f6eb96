//! Domain model (errors, IDs, orders, restaurant messages).

pub mod errors;
pub mod ids;
pub mod order;
pub mod messages;

pub use self::errors::{BuildError, CourierError, ErrorKind};
pub use self::ids::{OrderId, OrderTag};
pub use self::order::{LineItem, Order, SharedOrder};
pub use self::messages::{OrderEvent, OrderPaid, OrderPlaced, PaymentEvent, TakePayment};
