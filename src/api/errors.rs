use serde::{Deserialize, Serialize};

use crate::domain::{ChannelKey, Chips, PlayerKey};
use crate::engine::EngineError;
use crate::infra::ledger::LedgerError;

/// Ошибки внешнего API (то, что отдаём диспетчеру чата).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные.
    BadRequest(String),

    /// У игрока уже идёт партия.
    AlreadyInProgress(PlayerKey),

    /// В канале идёт партия другого игрока.
    ChannelOccupied(ChannelKey),

    /// У игрока нет активной партии.
    NoActiveGame(PlayerKey),

    /// Ход не игрока или партия уже рассчитана.
    InvalidAction,

    /// Ставка равна нулю.
    InvalidWager,

    /// Ставка больше баланса.
    InsufficientChips { wager: Chips, balance: Chips },

    /// Ошибка хранилища игроков.
    Ledger(String),

    /// Внутренняя ошибка (нарушение инварианта, отравленный мьютекс).
    Internal(String),
}

impl ApiError {
    /// Текст для пользователя в чате.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => format!("Sorry, I didn't understand that: {msg}"),
            ApiError::AlreadyInProgress(player) => format!(
                "{player}, you already have a game in progress. Finish it first, or start over with force."
            ),
            ApiError::ChannelOccupied(_) => {
                "Someone else is already playing in this channel.".to_string()
            }
            ApiError::NoActiveGame(player) => {
                format!("{player}, you don't have a game in progress.")
            }
            ApiError::InvalidAction => "It's not your turn.".to_string(),
            ApiError::InvalidWager => "You must wager at least 1 chip.".to_string(),
            ApiError::InsufficientChips { wager, balance } => format!(
                "You can't wager {wager} chips, you only have {balance}."
            ),
            ApiError::Ledger(_) | ApiError::Internal(_) => {
                "Something went wrong at the casino. Please try again.".to_string()
            }
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::EmptyDeck(e) => ApiError::Internal(e.to_string()),
            EngineError::InvalidAction => ApiError::InvalidAction,
            EngineError::AlreadyInProgress(key) => ApiError::AlreadyInProgress(key),
            EngineError::ChannelOccupied(channel) => ApiError::ChannelOccupied(channel),
            EngineError::NoActiveGame(key) => ApiError::NoActiveGame(key),
            EngineError::InvalidWager => ApiError::InvalidWager,
            EngineError::InsufficientChips { wager, balance } => {
                ApiError::InsufficientChips { wager, balance }
            }
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError::Ledger(err.to_string())
    }
}
