//! Adapter - Handler を別の Message 型として公開する
//!
//! # 学習ポイント
//! - 2 つの型パラメータ（公開する型 `TInput` と包む型 `TOutput`）を持つジェネリック struct
//! - 型の関係は trait bound で構築時に保証（`Upcast` / `Downcast`）
//! - 実行時の変換は `handle` の 1 箇所だけ
//!
//! | Adapter | Bound | 型が合わないとき |
//! |---|---|---|
//! | `Widen` | `TInput: Upcast<TOutput>` | 起こりえない |
//! | `NarrowStrict` | `TInput: Downcast<TOutput>` | `CourierError::TypeMismatch` |
//! | `NarrowTolerant` | `TInput: Downcast<TOutput>` | 何もしない |
//!
//! どの adapter も identity は包んでいる Handler のもの（[`super::identity`] 参照）。

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use tracing::trace;

use super::handler::{Handler, HandlerRef};
use super::identity::HandlerKey;
use super::message::{Downcast, Message, Upcast, short_type_name};
use crate::domain::errors::CourierError;

/// Widen は広い型の Handler を具体的な型で使う
///
/// 例: `Handler<OrderEvent>` を `OrderPlaced` の購読者として登録する。
pub struct Widen<TInput, TOutput: Message> {
    inner: HandlerRef<TOutput>,
    _marker: PhantomData<TInput>,
}

impl<TInput, TOutput> Widen<TInput, TOutput>
where
    TInput: Upcast<TOutput>,
    TOutput: Message,
{
    pub fn new(handler: HandlerRef<TOutput>) -> Self {
        Self {
            inner: handler,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<TInput, TOutput> Handler<TInput> for Widen<TInput, TOutput>
where
    TInput: Upcast<TOutput>,
    TOutput: Message,
{
    async fn handle(&self, message: TInput) -> Result<(), CourierError> {
        self.inner
            .handle(<TInput as Upcast<TOutput>>::upcast(message))
            .await
    }

    fn identity(&self) -> Option<HandlerKey> {
        Some(self.inner.key())
    }
}

impl<TInput, TOutput: Message> fmt::Debug for Widen<TInput, TOutput> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Widen<{}, {}>({:?})",
            short_type_name::<TInput>(),
            short_type_name::<TOutput>(),
            self.inner
        )
    }
}

/// NarrowStrict は具体的な型の Handler を広い型で使う（不一致はエラー）
///
/// 「この型しか流れてこない」と分かっている経路に登録するためのもの。
/// 違う型が来たらプログラムの誤りなので、`TypeMismatch` を呼び出し側に返します。
pub struct NarrowStrict<TInput, TOutput: Message> {
    inner: HandlerRef<TOutput>,
    _marker: PhantomData<TInput>,
}

impl<TInput, TOutput> NarrowStrict<TInput, TOutput>
where
    TInput: Downcast<TOutput>,
    TOutput: Message,
{
    pub fn new(handler: HandlerRef<TOutput>) -> Self {
        Self {
            inner: handler,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<TInput, TOutput> Handler<TInput> for NarrowStrict<TInput, TOutput>
where
    TInput: Downcast<TOutput>,
    TOutput: Message,
{
    async fn handle(&self, message: TInput) -> Result<(), CourierError> {
        match <TInput as Downcast<TOutput>>::downcast(message) {
            Ok(narrowed) => self.inner.handle(narrowed).await,
            Err(original) => {
                let expected = short_type_name::<TOutput>();
                let actual = original.kind();
                trace!(adapter = ?self, expected, actual, "narrowing failed");
                Err(CourierError::TypeMismatch {
                    expected,
                    actual,
                    adapter: format!("{self:?}"),
                })
            }
        }
    }

    fn identity(&self) -> Option<HandlerKey> {
        Some(self.inner.key())
    }
}

impl<TInput, TOutput: Message> fmt::Debug for NarrowStrict<TInput, TOutput> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NarrowStrict<{}, {}>({:?})",
            short_type_name::<TInput>(),
            short_type_name::<TOutput>(),
            self.inner
        )
    }
}

/// NarrowTolerant は具体的な型の Handler を広い型で使う（不一致は無視）
///
/// 広い型で購読しつつ、特定の variant だけに反応したい場合に使います。
pub struct NarrowTolerant<TInput, TOutput: Message> {
    inner: HandlerRef<TOutput>,
    _marker: PhantomData<TInput>,
}

impl<TInput, TOutput> NarrowTolerant<TInput, TOutput>
where
    TInput: Downcast<TOutput>,
    TOutput: Message,
{
    pub fn new(handler: HandlerRef<TOutput>) -> Self {
        Self {
            inner: handler,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<TInput, TOutput> Handler<TInput> for NarrowTolerant<TInput, TOutput>
where
    TInput: Downcast<TOutput>,
    TOutput: Message,
{
    async fn handle(&self, message: TInput) -> Result<(), CourierError> {
        match <TInput as Downcast<TOutput>>::downcast(message) {
            Ok(narrowed) => self.inner.handle(narrowed).await,
            Err(original) => {
                trace!(adapter = ?self, skipped = original.kind(), "message skipped");
                Ok(())
            }
        }
    }

    fn identity(&self) -> Option<HandlerKey> {
        Some(self.inner.key())
    }
}

impl<TInput, TOutput: Message> fmt::Debug for NarrowTolerant<TInput, TOutput> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NarrowTolerant<{}, {}>({:?})",
            short_type_name::<TInput>(),
            short_type_name::<TOutput>(),
            self.inner
        )
    }
}

impl<TOutput: Message> HandlerRef<TOutput> {
    /// より具体的な `TInput` の Handler として公開する
    pub fn widen<TInput: Upcast<TOutput>>(&self) -> HandlerRef<TInput> {
        HandlerRef::new(Widen::<TInput, TOutput>::new(self.clone()))
    }

    /// より広い `TInput` の Handler として公開する（不一致は `TypeMismatch`）
    pub fn narrow_strict<TInput: Downcast<TOutput>>(&self) -> HandlerRef<TInput> {
        HandlerRef::new(NarrowStrict::<TInput, TOutput>::new(self.clone()))
    }

    /// より広い `TInput` の Handler として公開する（不一致は無視）
    pub fn narrow_tolerant<TInput: Downcast<TOutput>>(&self) -> HandlerRef<TInput> {
        HandlerRef::new(NarrowTolerant::<TInput, TOutput>::new(self.clone()))
    }
}
