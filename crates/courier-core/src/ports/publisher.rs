//! Publisher port - メッセージ配送の抽象化

use async_trait::async_trait;

use crate::domain::errors::CourierError;
use crate::typed::Message;

/// Publisher はメッセージを購読者に配る
///
/// 配る先は「宣言された型 `M` で購読している Handler」。
/// 購読者がいなければ何もしません。
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish<M: Message>(&self, message: M) -> Result<(), CourierError>;
}
