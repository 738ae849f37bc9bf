use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Игрок казино: баланс и статистика. Ключ игрока равен username.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub username: String,
    pub chips: Chips,
    pub wins: u32,
    pub ties: u32,
    pub losses: u32,
}

impl Player {
    pub fn new(id: PlayerId, username: impl Into<String>, chips: Chips) -> Self {
        Self {
            id,
            username: username.into(),
            chips,
            wins: 0,
            ties: 0,
            losses: 0,
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.ties + self.losses
    }

    /// Хватает ли фишек на ставку.
    pub fn can_cover(&self, wager: Chips) -> bool {
        wager <= self.chips
    }
}
