//! RestaurantBuilder - レストランの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - adapter を使った購読の組み立て
//!
//! # 購読の組み立て
//! | 宣言型 | 購読者 |
//! |---|---|
//! | `OrderPlaced` | `OrderPrinter`（widen）, `PaymentRequester` |
//! | `PaymentEvent` | `OrderPrinter`（widen）, `Cashier`（narrow_strict） |
//! | `OrderPaid` | `OrderPrinter`（widen）, `Receipts` |

use std::any::TypeId;
use std::sync::Arc;

use crate::app::cashier::Cashier;
use crate::app::config::RestaurantConfig;
use crate::app::printer::OrderPrinter;
use crate::app::receipts::Receipts;
use crate::app::requester::PaymentRequester;
use crate::app::waiter::Waiter;
pub use crate::domain::errors::BuildError;
use crate::domain::messages::{OrderEvent, OrderPaid, OrderPlaced, PaymentEvent, TakePayment};
use crate::impls::{InMemoryBus, PublishingHandler, TracingHorn};
use crate::ports::{Horn, IdGenerator, SystemClock, UlidGenerator};
use crate::typed::{HandlerRef, Message, short_type_name};

/// RestaurantBuilder はレストランを構築
///
/// # 使用例
/// ```ignore
/// let restaurant = RestaurantBuilder::new(config)
///     .expect::<OrderPlaced>()
///     .expect::<PaymentEvent>()
///     .build()
///     .await?;
/// ```
///
/// # Fail-fast 設計
/// - expect() で購読者がいるべきメッセージ型を登録
/// - build() 時に「期待集合 ⊆ 購読済み集合」をチェック
/// - 不足があれば BuildError を返す
pub struct RestaurantBuilder {
    config: RestaurantConfig,
    horn: Arc<dyn Horn>,
    ids: Arc<dyn IdGenerator>,
    expected: Vec<(TypeId, &'static str)>,
}

impl RestaurantBuilder {
    pub fn new(config: RestaurantConfig) -> Self {
        Self {
            config,
            horn: Arc::new(TracingHorn),
            ids: Arc::new(UlidGenerator::new(SystemClock)),
            expected: Vec::new(),
        }
    }

    pub fn with_horn(mut self, horn: Arc<dyn Horn>) -> Self {
        self.horn = horn;
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// `M` に購読者がいることを build() で確認する
    pub fn expect<M: Message>(mut self) -> Self {
        self.expected
            .push((TypeId::of::<M>(), short_type_name::<M>()));
        self
    }

    /// bus と Handler を組み立てて Restaurant を生成
    ///
    /// # 検証
    /// - expect() で設定されたメッセージ型に購読者がいるかチェック
    /// - 不足があれば BuildError::MissingSubscribers を返す
    pub async fn build(self) -> Result<Restaurant, BuildError> {
        let bus = Arc::new(InMemoryBus::with_policy(self.config.bus.policy));

        let printer = HandlerRef::<OrderEvent>::new(OrderPrinter::new(self.horn.clone()));
        let requester = HandlerRef::<OrderPlaced>::new(PaymentRequester::new(bus.clone()));
        let cashier = HandlerRef::<TakePayment>::new(Cashier::new(
            bus.clone(),
            self.horn.clone(),
            self.config.cashier.payment_delay(),
        ));
        let receipts = Arc::new(Receipts::new());

        bus.subscribe::<OrderPlaced>(printer.widen()).await;
        bus.subscribe::<OrderPlaced>(requester.clone()).await;
        bus.subscribe::<PaymentEvent>(printer.widen()).await;
        bus.subscribe::<PaymentEvent>(cashier.narrow_strict()).await;
        bus.subscribe::<OrderPaid>(printer.widen()).await;
        bus.subscribe::<OrderPaid>(HandlerRef::from_shared(receipts.clone()))
            .await;

        let mut missing = Vec::new();
        for (type_id, name) in &self.expected {
            if !bus.has_subscribers(*type_id).await {
                missing.push(name.to_string());
            }
        }
        if !missing.is_empty() {
            return Err(BuildError::MissingSubscribers(missing));
        }

        let waiter = Waiter::new(
            HandlerRef::new(PublishingHandler::new(bus.clone())),
            self.ids,
        );

        Ok(Restaurant {
            waiter,
            bus,
            printer,
            cashier,
            receipts,
        })
    }
}

/// Restaurant は組み立て済みのシナリオ
///
/// Handler は `HandlerRef` のまま公開するので、呼び出し側で購読の解除もできます。
pub struct Restaurant {
    pub waiter: Waiter,
    pub bus: Arc<InMemoryBus>,
    pub printer: HandlerRef<OrderEvent>,
    pub cashier: HandlerRef<TakePayment>,
    pub receipts: Arc<Receipts>,
}
