//! Handler trait - Message を処理する Handler の定義
//!
//! # 学習ポイント
//! - ジェネリック trait (Handler<T>)
//! - Object-safe trait として `Arc<dyn Handler<T>>` に格納する
//! - `HandlerRef<T>` による共有所有権（adapter も registry も同じ Handler を指す）

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::identity::HandlerKey;
use super::message::Message;
use crate::domain::errors::CourierError;

/// Handler は 1 種類の Message を処理する
///
/// # 使用例
/// ```ignore
/// #[derive(Debug)]
/// struct PrintPing;
///
/// #[async_trait]
/// impl Handler<Ping> for PrintPing {
///     async fn handle(&self, _message: Ping) -> Result<(), CourierError> {
///         println!("ping");
///         Ok(())
///     }
/// }
/// ```
///
/// # Debug
/// adapter の `Debug` と `TypeMismatch` のメッセージには包んだ Handler の `Debug` がそのまま入ります。
/// 状態を持つ Handler は derive せず、名前だけを出す `Debug` を実装してください（`Cashier` と同じ）。
///
/// # ジェネリクスによる型安全性
/// - `Handler<Ping>` は `Ping` しか受け取れない
/// - 別の型で使いたい場合は adapter（widen / narrow）で包む
#[async_trait]
pub trait Handler<T: Message>: Send + Sync + fmt::Debug {
    async fn handle(&self, message: T) -> Result<(), CourierError>;

    /// registry での同一性
    ///
    /// `None`（デフォルト）ならインスタンスの同一性（`HandlerRef` が指すアドレス）。
    /// adapter はここで包んでいる Handler の key を返します。
    fn identity(&self) -> Option<HandlerKey> {
        None
    }
}

/// HandlerRef は共有された Handler への参照
///
/// `Clone` しても同じ Handler を指し、同じ `HandlerKey` を持ちます。
pub struct HandlerRef<T: Message> {
    inner: Arc<dyn Handler<T>>,
}

impl<T: Message> HandlerRef<T> {
    pub fn new<H: Handler<T> + 'static>(handler: H) -> Self {
        Self {
            inner: Arc::new(handler),
        }
    }

    /// 既に `Arc` で持っている Handler から作る
    ///
    /// 呼び出し側が具体型の `Arc<H>` を保持し続けても、同じ identity になります。
    pub fn from_shared<H: Handler<T> + 'static>(handler: Arc<H>) -> Self {
        Self { inner: handler }
    }

    /// 型消去済みの `Arc<dyn Handler<T>>` から作る（同じ `Arc` なら同じ identity）
    pub fn from_arc(handler: Arc<dyn Handler<T>>) -> Self {
        Self { inner: handler }
    }

    /// registry で使う同一性の key
    pub fn key(&self) -> HandlerKey {
        self.inner
            .identity()
            .unwrap_or_else(|| HandlerKey::of_instance(Arc::as_ptr(&self.inner)))
    }

    pub async fn handle(&self, message: T) -> Result<(), CourierError> {
        self.inner.handle(message).await
    }
}

impl<T: Message> Clone for HandlerRef<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Message> fmt::Debug for HandlerRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

impl<T: Message> fmt::Display for HandlerRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}
