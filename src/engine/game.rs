use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{Hand, Party, BLACKJACK};
use crate::domain::player::Player;
use crate::domain::{ChannelKey, GameId};
use crate::engine::actions::PlayerAction;
use crate::engine::dealer::DealerPolicy;
use crate::engine::errors::EngineError;
use crate::engine::history::{GameEventKind, GameHistory};
use crate::engine::settlement::{settle, GameSummary};
use crate::engine::RandomSource;

/// Стадия партии. Переходы только вперёд.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Stage {
    PlayerTurn,
    DealerTurn,
    Settled,
}

/// Статус партии для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Ход игрока: ждём hit / stand.
    Ongoing,
    Finished(GameSummary),
}

impl GameStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::Finished(_))
    }
}

/// Состояние одной партии блэкджека.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameEngine {
    pub game_id: GameId,
    /// Снимок игрока на момент старта (для отображения).
    pub player: Player,
    pub wager: Chips,
    pub channel: ChannelKey,
    pub deck: Deck,
    pub player_hand: Hand,
    pub dealer_hand: Hand,
    pub stage: Stage,
    pub policy: DealerPolicy,
    pub history: GameHistory,
    /// Заполняется ровно один раз, при переходе в `Settled`.
    pub summary: Option<GameSummary>,
}

impl GameEngine {
    pub fn player_key(&self) -> &str {
        &self.player.username
    }

    pub fn is_player_turn(&self) -> bool {
        self.stage == Stage::PlayerTurn
    }

    pub fn is_settled(&self) -> bool {
        self.stage == Stage::Settled
    }

    pub fn status(&self) -> GameStatus {
        match &self.summary {
            Some(summary) => GameStatus::Finished(summary.clone()),
            None => GameStatus::Ongoing,
        }
    }
}

/// Старт новой партии:
/// - тасует свежую колоду;
/// - раздаёт по две карты игроку и дилеру;
/// - сразу разрешает ход игрока (21 с раздачи уводит к дилеру).
pub fn start_game<R: RandomSource>(
    game_id: GameId,
    player: Player,
    wager: Chips,
    channel: ChannelKey,
    policy: DealerPolicy,
    rng: &mut R,
) -> Result<GameEngine, EngineError> {
    let mut deck = Deck::standard_52();
    deck.shuffle(rng);
    start_game_with_deck(game_id, player, wager, channel, policy, deck)
}

/// То же, что [`start_game`], но с уже подготовленной колодой (реплей, тесты).
/// Карты снимаются с конца вектора.
pub fn start_game_with_deck(
    game_id: GameId,
    player: Player,
    wager: Chips,
    channel: ChannelKey,
    policy: DealerPolicy,
    deck: Deck,
) -> Result<GameEngine, EngineError> {
    if wager.is_zero() {
        return Err(EngineError::InvalidWager);
    }
    if !player.can_cover(wager) {
        return Err(EngineError::InsufficientChips {
            wager,
            balance: player.chips,
        });
    }

    let mut engine = GameEngine {
        game_id,
        player,
        wager,
        channel: channel.clone(),
        deck,
        player_hand: Hand::new(),
        dealer_hand: Hand::new(),
        stage: Stage::PlayerTurn,
        policy,
        history: GameHistory::new(),
        summary: None,
    };

    engine.history.push(GameEventKind::GameStarted {
        game_id,
        channel,
        wager,
    });

    deal(&mut engine, Party::Player)?;
    deal(&mut engine, Party::Player)?;
    deal(&mut engine, Party::Dealer)?;
    deal(&mut engine, Party::Dealer)?;

    resolve_player_turn(&mut engine)?;

    Ok(engine)
}

/// Применить действие игрока. Вне хода игрока: `InvalidAction` без изменений.
pub fn apply_action(
    engine: &mut GameEngine,
    action: PlayerAction,
) -> Result<GameStatus, EngineError> {
    if !engine.is_player_turn() {
        return Err(EngineError::InvalidAction);
    }

    match action {
        PlayerAction::Hit => {
            deal(engine, Party::Player)?;
            resolve_player_turn(engine)
        }
        PlayerAction::Stand => {
            engine.history.push(GameEventKind::PlayerStood {
                value: engine.player_hand.value(),
            });
            run_dealer_turn(engine)
        }
    }
}

/// Снять верхнюю карту и отдать стороне.
fn deal(engine: &mut GameEngine, to: Party) -> Result<(), EngineError> {
    let card = engine.deck.deal_top()?;
    match to {
        Party::Player => engine.player_hand.push(card),
        Party::Dealer => engine.dealer_hand.push(card),
    }
    engine.history.push(GameEventKind::CardDealt { to, card });
    Ok(())
}

/// Меньше 21 ждём игрока. Перебор сразу идёт в расчёт без хода дилера. Ровно 21 передаёт ход дилеру.
fn resolve_player_turn(engine: &mut GameEngine) -> Result<GameStatus, EngineError> {
    let value = engine.player_hand.value();

    if value < BLACKJACK {
        Ok(GameStatus::Ongoing)
    } else if value > BLACKJACK {
        Ok(finish(engine))
    } else {
        run_dealer_turn(engine)
    }
}

fn run_dealer_turn(engine: &mut GameEngine) -> Result<GameStatus, EngineError> {
    engine.stage = Stage::DealerTurn;
    engine.history.push(GameEventKind::DealerTurnStarted);

    let player_value = engine.player_hand.value();
    while engine.policy.should_hit(&engine.dealer_hand, player_value) {
        deal(engine, Party::Dealer)?;
    }

    Ok(finish(engine))
}

fn finish(engine: &mut GameEngine) -> GameStatus {
    let summary = settle(&engine.player_hand, &engine.dealer_hand, engine.wager);

    engine.history.push(GameEventKind::GameSettled {
        outcome: summary.outcome,
        player_value: summary.player_value,
        dealer_value: summary.dealer_value,
        wager_delta: summary.wager_delta,
    });

    engine.stage = Stage::Settled;
    engine.summary = Some(summary.clone());
    GameStatus::Finished(summary)
}
