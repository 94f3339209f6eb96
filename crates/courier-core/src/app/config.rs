//! RestaurantConfig - TOML 設定
//!
//! 全てのセクション・キーは省略可能で、省略時はデフォルト値になります。
//!
//! ```toml
//! [cashier]
//! payment_delay_ms = 500
//!
//! [bus]
//! policy = "fail_fast"   # または "deliver_all"
//!
//! [logging]
//! filter = "info"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::errors::CourierError;
use crate::impls::DispatchPolicy;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantConfig {
    pub cashier: CashierConfig,
    pub bus: BusConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashierConfig {
    /// 支払い処理の擬似的な待ち時間
    pub payment_delay_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    pub policy: DispatchPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing-subscriber の EnvFilter 書式（`RUST_LOG` が優先）
    pub filter: String,
}

impl Default for CashierConfig {
    fn default() -> Self {
        Self {
            payment_delay_ms: 500,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl CashierConfig {
    pub const fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }
}

impl RestaurantConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, CourierError> {
        toml::from_str(source).map_err(|e| CourierError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CourierError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| CourierError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }
}
