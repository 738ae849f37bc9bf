//! Расчёт партии и применение результата к балансу игрока.

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Hand;
use crate::domain::player::Player;

/// Исход партии с точки зрения игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Outcome {
    PlayerWin,
    DealerWin,
    Draw,
}

/// Почему партия закончилась именно так.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SettleReason {
    PlayerBust,
    DealerBust,
    /// Сравнение очков без перебора.
    Showdown,
}

/// Итог партии: всё, что нужно слою отображения и учёту фишек.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSummary {
    pub outcome: Outcome,
    pub reason: SettleReason,
    pub player_hand: Hand,
    pub dealer_hand: Hand,
    pub player_value: u8,
    pub dealer_value: u8,
    pub wager: Chips,
    /// `+wager`, `-wager` или 0.
    pub wager_delta: i64,
}

/// Сравнить руки и посчитать дельту ставки.
///
/// Дилер выигрывает только при строго большем счёте; равенство: ничья.
pub fn settle(player_hand: &Hand, dealer_hand: &Hand, wager: Chips) -> GameSummary {
    let player_value = player_hand.value();
    let dealer_value = dealer_hand.value();

    let (outcome, reason) = if player_hand.is_bust() {
        (Outcome::DealerWin, SettleReason::PlayerBust)
    } else if dealer_hand.is_bust() {
        (Outcome::PlayerWin, SettleReason::DealerBust)
    } else if dealer_value > player_value {
        (Outcome::DealerWin, SettleReason::Showdown)
    } else if dealer_value == player_value {
        (Outcome::Draw, SettleReason::Showdown)
    } else {
        (Outcome::PlayerWin, SettleReason::Showdown)
    };

    let stake = i64::try_from(wager.0).unwrap_or(i64::MAX);
    let wager_delta = match outcome {
        Outcome::PlayerWin => stake,
        Outcome::DealerWin => -stake,
        Outcome::Draw => 0,
    };

    GameSummary {
        outcome,
        reason,
        player_hand: player_hand.clone(),
        dealer_hand: dealer_hand.clone(),
        player_value,
        dealer_value,
        wager,
        wager_delta,
    }
}

/// Изменение баланса после расчёта.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChipUpdate {
    pub before: Chips,
    pub after: Chips,
    /// Фактически применённая дельта (с учётом пола в 1 фишку).
    pub applied_delta: i64,
    /// Сработало ли правило «милости казино».
    pub mercy_applied: bool,
}

impl ChipUpdate {
    fn between(before: Chips, after: Chips, requested: i64) -> Self {
        let applied_delta = after.delta_from(before);
        Self {
            before,
            after,
            applied_delta,
            mercy_applied: applied_delta != requested,
        }
    }
}

/// Применить итог партии к игроку: баланс с полом и ровно один счётчик.
pub fn apply_settlement(player: &mut Player, summary: &GameSummary) -> ChipUpdate {
    let before = player.chips;
    player.chips = before.apply_delta(summary.wager_delta);

    match summary.outcome {
        Outcome::PlayerWin => player.wins += 1,
        Outcome::DealerWin => player.losses += 1,
        Outcome::Draw => player.ties += 1,
    }

    ChipUpdate::between(before, player.chips, summary.wager_delta)
}

/// Списать ставку брошенной партии. Статистика не меняется.
pub fn apply_forfeit(player: &mut Player, wager: Chips) -> ChipUpdate {
    let before = player.chips;
    let requested = -i64::try_from(wager.0).unwrap_or(i64::MAX);
    player.chips = before.apply_delta(requested);
    ChipUpdate::between(before, player.chips, requested)
}
