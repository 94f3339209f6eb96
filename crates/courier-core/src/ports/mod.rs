//! Ports - 抽象化レイヤー
//!
//! シナリオ側（app）が依存する外部の協力者をここで trait として定義します。
//! 実装は impls に置きます。
//!
//! - Publisher: メッセージを bus に流す
//! - Horn: アナウンス用の出力チャネル
//! - Clock / IdGenerator: 時刻と ID の生成（テストで差し替え可能）

pub mod publisher;
pub mod horn;
pub mod clock;
pub mod id_generator;

// 主要な trait を再エクスポート
pub use self::publisher::Publisher;
pub use self::horn::Horn;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
