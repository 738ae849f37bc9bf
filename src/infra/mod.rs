//! Инфраструктурный слой вокруг движка блэкджека:
//! - генерация ID;
//! - RNG-реализации для движка;
//! - хранилище игроков (баланс, статистика);
//! - конфигурация.

pub mod config;
pub mod ids;
pub mod ledger;
pub mod rng;

pub use config::{Config, ConfigError};
pub use ids::*;
pub use ledger::{InMemoryLedger, JsonFileLedger, LeaderboardSort, LedgerError, PlayerLedger};
pub use rng::*;
