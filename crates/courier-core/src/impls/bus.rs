//! InMemoryBus - インプロセスの pub/sub bus
//!
//! # 学習ポイント
//! - tokio の RwLock で TypedRegistry を共有
//! - 配送前に Handler 一覧を複製してロックを手放す（Handler の中から publish できるように）
//! - 失敗時の方針（DispatchPolicy）を設定で切り替える

use std::any::TypeId;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, trace, warn};

use crate::domain::errors::CourierError;
use crate::ports::Publisher;
use crate::typed::{HandlerRef, Message, TypedRegistry, short_type_name};

/// Handler がエラーを返したときの配送方針
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// 最初のエラーで配送をやめ、そのエラーを返す
    #[default]
    FailFast,
    /// 全員に配ってから、最初のエラーを返す
    DeliverAll,
}

/// InMemoryBus は宣言型 `M` の購読者にメッセージを配る
///
/// # 使用例
/// ```ignore
/// let bus = Arc::new(InMemoryBus::new());
/// bus.subscribe::<OrderPlaced>(printer.widen()).await;
/// bus.publish(order_placed).await?;
/// ```
#[derive(Default)]
pub struct InMemoryBus {
    registry: RwLock<TypedRegistry>,
    policy: DispatchPolicy,
}

impl InMemoryBus {
    pub fn new() -> Self {
        Self::with_policy(DispatchPolicy::default())
    }

    pub fn with_policy(policy: DispatchPolicy) -> Self {
        Self {
            registry: RwLock::new(TypedRegistry::new()),
            policy,
        }
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// 等しい Handler が既に `M` を購読していれば `false`
    pub async fn subscribe<M: Message>(&self, handler: HandlerRef<M>) -> bool {
        let added = self.registry.write().await.subscribe(handler.clone());
        debug!(
            message_type = short_type_name::<M>(),
            handler = %handler,
            added,
            "subscribe"
        );
        added
    }

    pub async fn unsubscribe<M: Message, N: Message>(&self, handler: &HandlerRef<N>) -> bool {
        let removed = self.registry.write().await.unsubscribe::<M, N>(handler);
        debug!(
            message_type = short_type_name::<M>(),
            handler = %handler,
            removed,
            "unsubscribe"
        );
        removed
    }

    pub async fn unsubscribe_everywhere<N: Message>(&self, handler: &HandlerRef<N>) -> usize {
        let removed = self.registry.write().await.unsubscribe_everywhere(handler);
        debug!(handler = %handler, removed, "unsubscribe everywhere");
        removed
    }

    pub async fn subscribers<M: Message>(&self) -> Vec<HandlerRef<M>> {
        self.registry.read().await.handlers::<M>()
    }

    pub async fn has_subscribers(&self, message_type: TypeId) -> bool {
        self.registry.read().await.has_subscribers(message_type)
    }

    pub async fn registrant_count(&self) -> usize {
        self.registry.read().await.registrant_count()
    }
}

#[async_trait]
impl Publisher for InMemoryBus {
    async fn publish<M: Message>(&self, message: M) -> Result<(), CourierError> {
        // guard は文の終わりで解放される
        let handlers = self.registry.read().await.handlers::<M>();
        let message_type = short_type_name::<M>();
        if handlers.is_empty() {
            trace!(message_type, kind = message.kind(), "no subscribers");
            return Ok(());
        }

        let mut first_error = None;
        for handler in handlers {
            trace!(message_type, kind = message.kind(), handler = %handler, "deliver");
            if let Err(err) = handler.handle(message.clone()).await {
                warn!(message_type, handler = %handler, error = %err, "handler failed");
                match self.policy {
                    DispatchPolicy::FailFast => return Err(err),
                    DispatchPolicy::DeliverAll => {
                        first_error.get_or_insert(err);
                    }
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
