use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{GameId, PlayerId};

/// Простая генерация ID на основе монотонных счётчиков.
#[derive(Debug)]
pub struct IdGenerator {
    player_counter: AtomicU64,
    game_counter: AtomicU64,
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1 для всех сущностей.
    pub fn new() -> Self {
        Self::starting_at(1, 1)
    }

    /// Продолжить нумерацию после уже выданных ID (например, после загрузки из файла).
    pub fn starting_at(next_player: PlayerId, next_game: GameId) -> Self {
        Self {
            player_counter: AtomicU64::new(next_player),
            game_counter: AtomicU64::new(next_game),
        }
    }

    #[inline]
    pub fn next_player_id(&self) -> PlayerId {
        self.player_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_game_id(&self) -> GameId {
        self.game_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
