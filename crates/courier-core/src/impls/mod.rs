//! Impls - ports の実装（インプロセス用）
//!
//! # 含まれる実装
//! - **InMemoryBus**: TypedRegistry を持つ Publisher
//! - **PublishingHandler**: 受け取ったメッセージを Publisher に流す Handler
//! - **TracingHorn**: tracing に流す Horn
//! - **RecordingHorn**: アナウンスを記録する Horn（テスト・デモ用）

pub mod bus;
pub mod publishing;
pub mod horn;

// 主要な型を再エクスポート
pub use self::bus::{DispatchPolicy, InMemoryBus};
pub use self::publishing::PublishingHandler;
pub use self::horn::{RecordingHorn, TracingHorn};
