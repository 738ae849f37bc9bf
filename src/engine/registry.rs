// src/engine/registry.rs

use std::collections::HashMap;

use crate::domain::{ChannelKey, PlayerKey};
use crate::engine::{self, EngineError, GameEngine, GameStatus, PlayerAction};

/// Реестр активных партий:
/// - не больше одной партии на игрока;
/// - канал указывает максимум на одну партию.
///
/// Синхронизации внутри нет: владелец (сервис) держит реестр под мьютексом.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: HashMap<PlayerKey, GameEngine>,
    by_channel: HashMap<ChannelKey, PlayerKey>,
}

impl GameRegistry {
    /// Создать пустой реестр.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Есть ли у игрока активная партия.
    pub fn contains(&self, key: &str) -> bool {
        self.games.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &PlayerKey> {
        self.games.keys()
    }

    /// Зарегистрировать партию под ключом игрока.
    ///
    /// Без `force` повторный старт: `AlreadyInProgress`. С `force` прежняя
    /// партия снимается и возвращается вызывающему как брошенная: ставку по ней
    /// нужно списать отдельно (`settlement::apply_forfeit`).
    pub fn start(
        &mut self,
        key: PlayerKey,
        game: GameEngine,
        force: bool,
    ) -> Result<Option<GameEngine>, EngineError> {
        if self.games.contains_key(&key) && !force {
            return Err(EngineError::AlreadyInProgress(key));
        }

        if let Some(owner) = self.by_channel.get(&game.channel) {
            if *owner != key {
                return Err(EngineError::ChannelOccupied(game.channel.clone()));
            }
        }

        let forfeited = self.end(&key);
        self.by_channel.insert(game.channel.clone(), key.clone());
        self.games.insert(key, game);

        Ok(forfeited)
    }

    /// Партия игрока (read-only).
    pub fn find(&self, key: &str) -> Option<&GameEngine> {
        self.games.get(key)
    }

    /// Партия игрока (mutable).
    pub fn find_mut(&mut self, key: &str) -> Option<&mut GameEngine> {
        self.games.get_mut(key)
    }

    /// Партия, идущая в канале.
    pub fn find_by_channel(&self, channel: &str) -> Option<&GameEngine> {
        self.by_channel
            .get(channel)
            .and_then(|key| self.games.get(key))
    }

    /// Снять партию с учёта (после расчёта или при брошенной партии).
    pub fn end(&mut self, key: &str) -> Option<GameEngine> {
        let game = self.games.remove(key)?;
        if self.by_channel.get(&game.channel).map(String::as_str) == Some(key) {
            self.by_channel.remove(&game.channel);
        }
        Some(game)
    }

    /// Применить действие к партии игрока.
    ///
    /// Партия остаётся в реестре и после расчёта. Снять её должен вызывающий
    /// (`end`), после того как он учтёт итог в балансе.
    pub fn apply_action(
        &mut self,
        key: &str,
        action: PlayerAction,
    ) -> Result<GameStatus, EngineError> {
        let game = self
            .games
            .get_mut(key)
            .ok_or_else(|| EngineError::NoActiveGame(key.to_string()))?;

        engine::apply_action(game, action)
    }
}
