//! Horn の実装

use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::ports::Horn;

/// TracingHorn はアナウンスを `courier::horn` target の info ログに流す
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHorn;

impl Horn for TracingHorn {
    fn say(&self, line: &str) {
        info!(target: "courier::horn", "{line}");
    }
}

/// RecordingHorn はアナウンスを順番に記録する
#[derive(Debug, Default)]
pub struct RecordingHorn {
    lines: Mutex<Vec<String>>,
}

impl RecordingHorn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Horn for RecordingHorn {
    fn say(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_horn_keeps_order() {
        let horn = RecordingHorn::new();
        horn.say("first");
        horn.say("second");
        assert_eq!(horn.lines(), vec!["first", "second"]);
    }
}
