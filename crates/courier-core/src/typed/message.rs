//! Message trait - メッセージ階層の定義
//!
//! # 学習ポイント
//! - Rust には継承がないので、「is-a」関係を trait で表現する
//! - `Upcast<T>`: 必ず成功する変換（具体型 → 広い型）
//! - `Downcast<T>`: 実行時に失敗しうる変換（広い型 → 具体型）
//! - 広い型は enum で表現し、variant が子の型を包む（単一ルートの木構造）

use std::any::type_name;

/// Message は全てのメッセージが満たす marker trait
///
/// # 使用例
/// ```ignore
/// #[derive(Debug, Clone)]
/// struct Ping;
///
/// impl Message for Ping {}
/// ```
///
/// # Trait Bounds
/// - `Clone`: bus が複数の Handler に配るため
/// - `Send + Sync + 'static`: async Handler と Arc に載せるため
pub trait Message: Clone + Send + Sync + 'static {
    /// 値の「最も具体的な」実行時型の名前
    ///
    /// enum で表現した広い型は、中身の variant の型名を返すように上書きします。
    fn kind(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

/// `Self` is-a `T`（必ず成功する upcast）
pub trait Upcast<T: Message>: Message {
    fn upcast(self) -> T;
}

/// `Self` の値は実行時に `T` かもしれない
///
/// 不一致の場合は元の値を `Err` で返します（実際の型名を報告できるように）。
pub trait Downcast<T: Message>: Message {
    fn downcast(self) -> Result<T, Self>;
}

impl<T: Message> Upcast<T> for T {
    fn upcast(self) -> T {
        self
    }
}

impl<T: Message> Downcast<T> for T {
    fn downcast(self) -> Result<T, Self> {
        Ok(self)
    }
}

/// モジュールパスとジェネリクスを落とした型名
///
/// `courier_core::domain::messages::TakePayment` → `TakePayment`
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}
