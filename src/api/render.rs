//! Текстовое представление партии для чата.
//!
//! Только чистые функции над состоянием движка: ни одна из них ничего не мутирует.

use std::fmt::Write as _;

use crate::domain::hand::Hand;
use crate::engine::{ChipUpdate, GameEngine, GameSummary, Outcome, PlayerAction, SettleReason};
use crate::infra::ledger::LeaderboardSort;

use super::dto::LeaderboardEntry;

pub const PROMPT: &str = "Enter !hit to hit, !stand to stand.";
pub const HIDDEN_CARD: &str = "[Hidden Card]";
const BANNER: &str = "=======================\n\t\t\t\tRESULTS\n=======================";

/// Карты по одной на строку и итоговая стоимость.
pub fn hand_text(hand: &Hand) -> String {
    format!("{hand}\n\nThe value is: {}", hand.value())
}

pub fn player_hand_message(username: &str, hand: &Hand) -> String {
    format!("{username}, your hand is:\n\n{}", hand_text(hand))
}

pub fn dealer_hand_message(hand: &Hand) -> String {
    format!("The dealer's hand is:\n\n{}", hand_text(hand))
}

/// Открыта только первая карта дилера.
pub fn dealer_hidden_message(hand: &Hand) -> String {
    match hand.first() {
        Some(card) => format!("The dealer's hand is:\n\n{card}\n{HIDDEN_CARD}"),
        None => format!("The dealer's hand is:\n\n{HIDDEN_CARD}"),
    }
}

/// Итог партии: обе руки и вердикт.
pub fn results_message(username: &str, summary: &GameSummary) -> String {
    let verdict = match summary.outcome {
        Outcome::DealerWin => "The dealer wins.".to_string(),
        Outcome::Draw => "It's a draw!".to_string(),
        Outcome::PlayerWin => format!("{username} wins!"),
    };

    format!(
        "{BANNER}\n\n{}\n\n{}\n\n{verdict}",
        player_hand_message(username, &summary.player_hand),
        dealer_hand_message(&summary.dealer_hand),
    )
}

/// "1 chip", "10 chips".
pub fn chips_text(amount: u64) -> String {
    if amount == 1 {
        "1 chip".to_string()
    } else {
        format!("{amount} chips")
    }
}

/// Строка про фишки после расчёта.
pub fn chip_message(username: &str, update: &ChipUpdate) -> String {
    let mut msg = match update.applied_delta {
        d if d > 0 => format!("{username} won {}", chips_text(d.unsigned_abs())),
        d if d < 0 => format!("{username} lost {}", chips_text(d.unsigned_abs())),
        _ => format!("{username} keeps their wager"),
    };
    let _ = write!(msg, " and now has {}.", chips_text(update.after.0));

    if update.mercy_applied {
        let _ = write!(
            msg,
            "\nThe house takes pity on you and leaves you with {}.",
            chips_text(update.after.0)
        );
    }
    msg
}

pub fn forfeit_message(username: &str, update: &ChipUpdate) -> String {
    format!(
        "{username} abandoned their game and forfeited the wager.\n{}",
        chip_message(username, update)
    )
}

/// Текст сразу после раздачи.
pub fn started_text(game: &GameEngine) -> String {
    let mut parts = vec![
        format!("{} wagers {}.", game.player.username, chips_text(game.wager.0)),
        dealer_hidden_message(&game.dealer_hand),
    ];
    parts.extend(turn_tail(game, None));
    parts.join("\n\n")
}

/// Текст после hit / stand.
pub fn action_text(game: &GameEngine, action: PlayerAction) -> String {
    turn_tail(game, Some(action)).join("\n\n")
}

fn turn_tail(game: &GameEngine, action: Option<PlayerAction>) -> Vec<String> {
    let username = game.player.username.as_str();
    let mut parts = vec![player_hand_message(username, &game.player_hand)];

    let Some(summary) = &game.summary else {
        parts.push(PROMPT.to_string());
        return parts;
    };

    match summary.reason {
        SettleReason::PlayerBust => parts.push("Uh oh, you bust!".to_string()),
        _ => {
            if action == Some(PlayerAction::Stand) {
                parts.push("You stand! It is now the dealer's turn.".to_string());
            }
            parts.push("It is the dealer's turn!".to_string());
        }
    }
    parts.push(results_message(username, summary));
    parts
}

pub fn leaderboard_text(entries: &[LeaderboardEntry], sort: LeaderboardSort) -> String {
    let title = match sort {
        LeaderboardSort::Wins => "Leaderboard (wins)",
        LeaderboardSort::Chips => "Leaderboard (chips)",
    };

    let mut out = String::from(title);
    if entries.is_empty() {
        out.push_str("\nNo players yet.");
        return out;
    }

    for e in entries {
        let _ = write!(
            out,
            "\n{}. {} | chips: {} | W/T/L: {}/{}/{}",
            e.place, e.username, e.chips, e.wins, e.ties, e.losses
        );
    }
    out
}
