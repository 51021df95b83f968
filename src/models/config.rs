use std::time::Duration;

use chrono::{NaiveDateTime, TimeDelta, Utc};
use serde::Deserialize;

use crate::db::PoolOptions;

/// Configuration options of the savings service.
///
/// Loaded from `config/default.yaml`, an optional `config/{APP_ENV}.yaml`
/// and `APP_*` environment variables, in that order.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_address: String,
    pub port: u16,
    #[serde(default = "default_pool_size")]
    pub db_pool_size: u32,
    #[serde(default = "default_connection_timeout")]
    pub db_connection_timeout_secs: u64,
    #[serde(default = "default_busy_timeout")]
    pub db_busy_timeout_ms: u64,
    /// Endpoint of the loan prediction model.
    pub prediction_url: String,
    #[serde(default = "default_prediction_timeout")]
    pub prediction_timeout_secs: u64,
    /// Offset of the groups' wall clock from UTC. Kigali is UTC+2.
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,
}

fn default_pool_size() -> u32 {
    8
}

fn default_connection_timeout() -> u64 {
    5
}

fn default_busy_timeout() -> u64 {
    5000
}

fn default_prediction_timeout() -> u64 {
    10
}

fn default_utc_offset() -> i32 {
    120
}

impl ServerConfig {
    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_size: self.db_pool_size,
            connection_timeout: Duration::from_secs(self.db_connection_timeout_secs),
            busy_timeout: Duration::from_millis(self.db_busy_timeout_ms),
        }
    }

    pub fn prediction_timeout(&self) -> Duration {
        Duration::from_secs(self.prediction_timeout_secs)
    }

    /// Current wall-clock time of the groups; slots are scheduled in this clock.
    pub fn local_now(&self) -> NaiveDateTime {
        Utc::now().naive_utc() + TimeDelta::minutes(i64::from(self.utc_offset_minutes))
    }
}
