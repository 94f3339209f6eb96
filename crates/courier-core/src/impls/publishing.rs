//! PublishingHandler - Handler として受け取り、そのまま Publisher に流す

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::CourierError;
use crate::ports::Publisher;
use crate::typed::{Handler, Message};

/// PublishingHandler は任意のメッセージ型の Handler になれる
///
/// Waiter の「注文の渡し先」を bus にしたいときに使います。
pub struct PublishingHandler<P> {
    publisher: Arc<P>,
}

impl<P: Publisher> PublishingHandler<P> {
    pub fn new(publisher: Arc<P>) -> Self {
        Self { publisher }
    }
}

#[async_trait]
impl<M: Message, P: Publisher + 'static> Handler<M> for PublishingHandler<P> {
    async fn handle(&self, message: M) -> Result<(), CourierError> {
        self.publisher.publish(message).await
    }
}

impl<P> fmt::Debug for PublishingHandler<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PublishingHandler")
    }
}
