//! テスト用のメッセージ階層と Handler
//!
//! `Signal ⊃ { Ping, Pong }` の 2 段の階層。

use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;

use super::handler::Handler;
use super::identity::HandlerKey;
use super::message::{Downcast, Message, Upcast};
use crate::domain::errors::CourierError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ping;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pong {
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    Ping(Ping),
    Pong(Pong),
}

impl Message for Ping {}

impl Message for Pong {}

impl Message for Signal {
    fn kind(&self) -> &'static str {
        match self {
            Signal::Ping(m) => m.kind(),
            Signal::Pong(m) => m.kind(),
        }
    }
}

impl Upcast<Signal> for Ping {
    fn upcast(self) -> Signal {
        Signal::Ping(self)
    }
}

impl Upcast<Signal> for Pong {
    fn upcast(self) -> Signal {
        Signal::Pong(self)
    }
}

impl Downcast<Ping> for Signal {
    fn downcast(self) -> Result<Ping, Self> {
        match self {
            Signal::Ping(m) => Ok(m),
            other => Err(other),
        }
    }
}

impl Downcast<Pong> for Signal {
    fn downcast(self) -> Result<Pong, Self> {
        match self {
            Signal::Pong(m) => Ok(m),
            other => Err(other),
        }
    }
}

/// 受け取ったメッセージの `kind()` を記録する Handler
#[derive(Default)]
pub struct Recorder {
    seen: Mutex<Vec<String>>,
    fail_with: Option<String>,
    name: Option<&'static str>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録したうえで常に失敗する
    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// 名前で identity を持つ（値としての同一性）
    pub fn named(name: &'static str) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl fmt::Debug for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Recorder")
    }
}

#[async_trait]
impl<T: Message> Handler<T> for Recorder {
    async fn handle(&self, message: T) -> Result<(), CourierError> {
        self.seen.lock().unwrap().push(message.kind().to_string());
        match &self.fail_with {
            Some(reason) => Err(CourierError::handler(reason.clone())),
            None => Ok(()),
        }
    }

    fn identity(&self) -> Option<HandlerKey> {
        self.name.map(HandlerKey::named)
    }
}
