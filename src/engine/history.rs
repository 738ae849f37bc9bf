use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::hand::Party;
use crate::domain::{ChannelKey, Chips, GameId};
use crate::engine::settlement::Outcome;

/// Тип события в партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum GameEventKind {
    /// Новая партия началась.
    GameStarted {
        game_id: GameId,
        channel: ChannelKey,
        wager: Chips,
    },

    /// Карта ушла игроку или дилеру.
    CardDealt { to: Party, card: Card },

    /// Игрок остановился.
    PlayerStood { value: u8 },

    /// Ход перешёл к дилеру.
    DealerTurnStarted,

    /// Партия рассчитана.
    GameSettled {
        outcome: Outcome,
        player_value: u8,
        dealer_value: u8,
        wager_delta: i64,
    },
}

/// Событие с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GameEvent {
    pub index: u32,
    pub kind: GameEventKind,
}

/// История одной партии.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct GameHistory {
    pub events: Vec<GameEvent>,
    next_index: u32,
}

impl GameHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: GameEventKind) {
        let index = self.next_index;
        self.next_index += 1;
        self.events.push(GameEvent { index, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Все карты, выданные указанной стороне, в порядке раздачи.
    pub fn cards_dealt_to(&self, party: Party) -> Vec<Card> {
        self.events
            .iter()
            .filter_map(|e| match &e.kind {
                GameEventKind::CardDealt { to, card } if *to == party => Some(*card),
                _ => None,
            })
            .collect()
    }
}
