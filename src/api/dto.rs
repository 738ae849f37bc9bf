use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Hand;
use crate::domain::player::Player;
use crate::domain::{ChannelKey, GameId, PlayerKey};
use crate::engine::{ChipUpdate, GameSummary, Stage};

/// DTO руки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandView {
    pub cards: Vec<Card>,
    /// Стоимость видимых карт.
    pub value: u8,
    pub soft: bool,
}

impl HandView {
    pub fn from_hand(hand: &Hand) -> Self {
        Self {
            cards: hand.cards.clone(),
            value: hand.value(),
            soft: hand.is_soft(),
        }
    }
}

/// DTO партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameView {
    pub game_id: GameId,
    pub player_key: PlayerKey,
    pub channel_key: ChannelKey,
    pub wager: Chips,
    pub stage: Stage,
    pub player_hand: HandView,
    /// Пока ходит игрок: только открытая карта дилера.
    pub dealer_hand: HandView,
    pub dealer_hidden_cards: usize,
    pub summary: Option<GameSummary>,
}

/// Ответ движка на старт партии или действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameReply {
    /// Готовый текст для чата.
    pub text: String,
    pub view: GameView,
    /// Партия рассчитана и снята с учёта.
    pub ended: bool,
    /// Изменение баланса, если партия закончилась.
    pub chips: Option<ChipUpdate>,
}

/// Строка таблицы лидеров.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// Место, начиная с 1.
    pub place: u32,
    pub username: String,
    pub chips: Chips,
    pub wins: u32,
    pub ties: u32,
    pub losses: u32,
}

impl LeaderboardEntry {
    pub fn from_player(place: u32, player: &Player) -> Self {
        Self {
            place,
            username: player.username.clone(),
            chips: player.chips,
            wins: player.wins,
            ties: player.ties,
            losses: player.losses,
        }
    }
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    Game(GameReply),

    /// Партия брошена, ставка списана.
    Abandoned {
        player_key: PlayerKey,
        text: String,
        chips: ChipUpdate,
    },
}
