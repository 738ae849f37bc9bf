use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Hand;
use crate::domain::player::Player;
use crate::domain::{ChannelKey, PlayerKey};
use crate::engine::GameEngine;
use crate::infra::ledger::LeaderboardSort;

use super::dto::{GameView, HandView, LeaderboardEntry};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Текущая партия игрока.
    GetGame { player_key: PlayerKey },

    /// Партия, идущая в канале/треде.
    GetGameByChannel { channel_key: ChannelKey },

    /// Баланс игрока.
    ChipTotal { username: String },

    /// Таблица лидеров.
    Leaderboard {
        sort: LeaderboardSort,
        limit: Option<usize>,
    },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Game(Option<GameView>),
    ChipTotal { username: String, chips: Chips },
    Leaderboard(Vec<LeaderboardEntry>),
}

/// Сформировать DTO партии. Закрытая карта дилера раскрывается,
/// только когда ход игрока закончился.
pub fn build_game_view(game: &GameEngine) -> GameView {
    let (dealer_hand, dealer_hidden_cards) = if game.is_player_turn() {
        let visible = Hand::from_cards(game.dealer_hand.first().copied().into_iter().collect());
        let hidden = game.dealer_hand.len().saturating_sub(visible.len());
        (HandView::from_hand(&visible), hidden)
    } else {
        (HandView::from_hand(&game.dealer_hand), 0)
    };

    GameView {
        game_id: game.game_id,
        player_key: game.player.username.clone(),
        channel_key: game.channel.clone(),
        wager: game.wager,
        stage: game.stage,
        player_hand: HandView::from_hand(&game.player_hand),
        dealer_hand,
        dealer_hidden_cards,
        summary: game.summary.clone(),
    }
}

/// Собрать строки таблицы лидеров из уже отсортированных игроков.
pub fn build_leaderboard(players: &[Player], limit: Option<usize>) -> Vec<LeaderboardEntry> {
    players
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(idx, p)| LeaderboardEntry::from_player(idx as u32 + 1, p))
        .collect()
}
