use crate::domain::{ChannelKey, Chips, EmptyDeckError, PlayerKey};

use thiserror::Error;

/// Ошибки движка блэкджека.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Колода закончилась посреди партии: нарушение инварианта.
    #[error("Внутренняя ошибка: {0}")]
    EmptyDeck(#[from] EmptyDeckError),

    #[error("Действие недопустимо в текущем состоянии партии")]
    InvalidAction,

    #[error("У игрока {0} уже идёт партия")]
    AlreadyInProgress(PlayerKey),

    #[error("В канале {0} уже идёт партия другого игрока")]
    ChannelOccupied(ChannelKey),

    #[error("У игрока {0} нет активной партии")]
    NoActiveGame(PlayerKey),

    #[error("Ставка должна быть больше нуля")]
    InvalidWager,

    #[error("Недостаточно фишек: ставка {wager}, баланс {balance}")]
    InsufficientChips { wager: Chips, balance: Chips },
}
