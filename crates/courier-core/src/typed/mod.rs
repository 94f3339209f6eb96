//! Typed - 型付き Message / Handler API
//!
//! Message の型階層をまたいで Handler を再利用するための層です。
//!
//! # 二層構造
//! - **表層（Typed）**: `Message` / `Upcast` / `Downcast`, `Handler<T>` - 型安全
//! - **内部（Dyn）**: `HandlerRef<T>` と registry の slot - type erasure
//!
//! # Adapter
//! - `widen`: 具体的な型で登録し、広い型の Handler に渡す（失敗しない）
//! - `narrow_strict`: 広い型で登録し、狭い型の Handler に渡す（不一致はエラー）
//! - `narrow_tolerant`: 同上、ただし不一致は黙って捨てる

pub mod message;
pub mod handler;
pub mod identity;
pub mod adapter;
pub mod registry;

#[cfg(test)]
pub(crate) mod fixtures;

// 主要な trait/型 を再エクスポート
pub use self::message::{Downcast, Message, Upcast, short_type_name};
pub use self::handler::{Handler, HandlerRef};
pub use self::identity::HandlerKey;
pub use self::adapter::{NarrowStrict, NarrowTolerant, Widen};
pub use self::registry::TypedRegistry;
