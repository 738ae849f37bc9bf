//! Движок блэкджека для чат-бота: один игрок против дилера,
//! баланс фишек и статистика побед/ничьих/поражений по username.
//!
//! Слои:
//! - `domain`: карты, колода, руки, фишки, игроки;
//! - `engine`: очередь ходов, добор дилера, расчёт, реестр партий;
//! - `infra`: RNG, ID, хранилище игроков, конфиг;
//! - `api`: команды/запросы/DTO и текст для чата;
//! - `service`: фасад, которым пользуется диспетчер чата.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod service;

pub use service::CasinoService;
