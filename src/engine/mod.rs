//! Движок блэкджека: очередь ходов, добор дилера, расчёт ставки, реестр партий.
//!
//! Высокоуровневый объект: `GameEngine`
//! Основные операции:
//!   - `start_game` – раздать новую партию
//!   - `apply_action` – hit / stand игрока (ход дилера и расчёт выполняются сами)
//!   - `settlement::apply_settlement` – применить итог к балансу игрока

pub mod actions;
pub mod dealer;
pub mod errors;
pub mod game;
pub mod history;
pub mod registry;
pub mod settlement;

pub use actions::PlayerAction;
pub use dealer::DealerPolicy;
pub use errors::EngineError;
pub use game::{apply_action, start_game, start_game_with_deck, GameEngine, GameStatus, Stage};
pub use history::{GameEvent, GameEventKind, GameHistory};
pub use registry::GameRegistry;
pub use settlement::{apply_forfeit, apply_settlement, settle, ChipUpdate, GameSummary, Outcome, SettleReason};

/// RNG интерфейс для движка. Реализации лежат в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
