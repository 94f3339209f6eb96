//! Errors - エラー型と分類
//!
//! # 分類
//! - Programmer: adapter の登録範囲が Handler の扱える型より広い（strict narrow の不一致）
//! - Domain: Handler 自身の業務上の失敗（adapter はそのまま通す）
//! - Configuration: 設定ファイルの読み込み・解釈の失敗、ワイヤリング検証の失敗

use thiserror::Error;

/// ErrorKind は CourierError の運用上の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Programmer,
    Domain,
    Configuration,
}

#[derive(Debug, Error)]
pub enum CourierError {
    #[error("type mismatch in {adapter}: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
        adapter: String,
    },

    #[error("handler failed: {0}")]
    Handler(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// BuildError はレストラン構築時のエラー
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Missing subscribers for message types: {0:?}. These types were expected but nobody subscribed.")]
    MissingSubscribers(Vec<String>),
}

impl CourierError {
    pub fn handler(reason: impl Into<String>) -> Self {
        Self::Handler(reason.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CourierError::TypeMismatch { .. } => ErrorKind::Programmer,
            CourierError::Handler(_) => ErrorKind::Domain,
            CourierError::Config(_) | CourierError::Build(_) => ErrorKind::Configuration,
        }
    }
}
