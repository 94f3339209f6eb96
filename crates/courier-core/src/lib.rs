//! courier-core
//!
//! 型付きメッセージ階層の上で Handler を安全に付け替える pub/sub 基盤。
//!
//! # モジュール構成
//! - **typed**: Message 階層（Upcast / Downcast）、Handler trait、Adapter（widen / narrow）、
//!   identity bridge、TypedRegistry
//! - **domain**: エラー型、ID、注文モデル、レストランのメッセージ階層
//! - **ports**: 抽象化レイヤー（Publisher, Horn, Clock, IdGenerator）
//! - **impls**: ports の実装（InMemoryBus, TracingHorn, RecordingHorn など）
//! - **app**: レストランのシナリオ（Waiter, Cashier, RestaurantBuilder, 設定）

pub mod domain;
pub mod ports;
pub mod app;
pub mod typed;
pub mod impls;
