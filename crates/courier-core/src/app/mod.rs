//! App - レストランのシナリオ
//!
//! ports と typed を組み合わせて、adapter を実際に使う側のコードです。
//!
//! # 主要コンポーネント
//! - **Waiter**: 注文を作って order handler に渡す
//! - **Cashier**: 支払いを受けて OrderPaid を publish する
//! - **PaymentRequester**: 注文ごとに支払い依頼を publish する
//! - **OrderPrinter**: 全ての注文イベントをアナウンスする
//! - **Receipts**: 支払い済みの注文スナップショットを貯める
//! - **RestaurantBuilder**: 設定からの構築とワイヤリング
//! - **RestaurantConfig**: TOML 設定

pub mod config;
pub mod waiter;
pub mod cashier;
pub mod requester;
pub mod printer;
pub mod receipts;
pub mod builder;

// 主要な型を再エクスポート
pub use self::config::{BusConfig, CashierConfig, LoggingConfig, RestaurantConfig};
pub use self::waiter::Waiter;
pub use self::cashier::Cashier;
pub use self::requester::PaymentRequester;
pub use self::printer::OrderPrinter;
pub use self::receipts::Receipts;
pub use self::builder::{BuildError, Restaurant, RestaurantBuilder};
