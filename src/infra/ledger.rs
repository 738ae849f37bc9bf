//! Учёт игроков: баланс фишек и статистика побед/ничьих/поражений.
//!
//! Движку нужен только узкий контракт `PlayerLedger`. Здесь две реализации:
//! - `InMemoryLedger`: для тестов и локального запуска;
//! - `JsonFileLedger`: таблица игроков в JSON-файле (по пути из конфига).

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{Chips, Player};
use crate::infra::ids::IdGenerator;

/// Ошибки хранилища игроков.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] io::Error),

    #[error("Битый файл игроков: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Игрок {0} не найден")]
    PlayerNotFound(String),
}

/// Сортировка таблицы лидеров.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardSort {
    Wins,
    Chips,
}

/// Контракт хранилища игроков.
pub trait PlayerLedger {
    /// Найти игрока по username или создать его со стартовым балансом.
    fn find_or_create_player(&mut self, username: &str) -> Result<Player, LedgerError>;

    /// Сохранить игрока (баланс и счётчики). Игрок должен существовать.
    fn update_player(&mut self, player: &Player) -> Result<(), LedgerError>;

    /// Баланс игрока. Как и любое обращение, создаёт игрока при первом запросе.
    fn chip_total(&mut self, username: &str) -> Result<Chips, LedgerError> {
        Ok(self.find_or_create_player(username)?.chips)
    }

    /// Все игроки по убыванию выбранного ключа.
    fn leaderboard(&self, sort: LeaderboardSort) -> Result<Vec<Player>, LedgerError>;
}

/// Отсортировать игроков для таблицы лидеров. При равенстве: по имени.
pub fn sort_players(players: &mut [Player], sort: LeaderboardSort) {
    players.sort_by(|a, b| {
        let primary = match sort {
            LeaderboardSort::Wins => b.wins.cmp(&a.wins),
            LeaderboardSort::Chips => b.chips.cmp(&a.chips),
        };
        primary.then_with(|| a.username.cmp(&b.username))
    });
}

/// In-memory реализация для тестов и локального запуска.
#[derive(Debug)]
pub struct InMemoryLedger {
    players: HashMap<String, Player>,
    ids: IdGenerator,
    starting_chips: Chips,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::with_starting_chips(Chips::STARTING)
    }

    pub fn with_starting_chips(starting_chips: Chips) -> Self {
        Self {
            players: HashMap::new(),
            ids: IdGenerator::new(),
            starting_chips,
        }
    }

    /// Восстановить состояние из списка игроков.
    pub fn from_players(players: Vec<Player>, starting_chips: Chips) -> Self {
        let next_id = players.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            players: players
                .into_iter()
                .map(|p| (p.username.clone(), p))
                .collect(),
            ids: IdGenerator::starting_at(next_id, 1),
            starting_chips,
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, username: &str) -> Option<&Player> {
        self.players.get(username)
    }

    fn players_sorted_by_id(&self) -> Vec<Player> {
        let mut all: Vec<Player> = self.players.values().cloned().collect();
        all.sort_by_key(|p| p.id);
        all
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerLedger for InMemoryLedger {
    fn find_or_create_player(&mut self, username: &str) -> Result<Player, LedgerError> {
        if let Some(player) = self.players.get(username) {
            return Ok(player.clone());
        }

        let player = Player::new(self.ids.next_player_id(), username, self.starting_chips);
        debug!(username, id = player.id, chips = %player.chips, "created player");
        self.players.insert(username.to_string(), player.clone());
        Ok(player)
    }

    fn update_player(&mut self, player: &Player) -> Result<(), LedgerError> {
        let stored = self
            .players
            .get_mut(&player.username)
            .ok_or_else(|| LedgerError::PlayerNotFound(player.username.clone()))?;
        *stored = player.clone();
        Ok(())
    }

    fn leaderboard(&self, sort: LeaderboardSort) -> Result<Vec<Player>, LedgerError> {
        let mut all: Vec<Player> = self.players.values().cloned().collect();
        sort_players(&mut all, sort);
        Ok(all)
    }
}

/// Таблица игроков в JSON-файле. Каждое изменение переписывает файл целиком.
#[derive(Debug)]
pub struct JsonFileLedger {
    path: PathBuf,
    inner: InMemoryLedger,
}

impl JsonFileLedger {
    /// Открыть файл; если его нет: начать с пустой таблицы.
    pub fn open(path: impl AsRef<Path>, starting_chips: Chips) -> Result<Self, LedgerError> {
        let path = path.as_ref().to_path_buf();

        let players: Vec<Player> = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => Vec::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        debug!(path = %path.display(), players = players.len(), "opened player ledger");

        Ok(Self {
            path,
            inner: InMemoryLedger::from_players(players, starting_chips),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Записать во временный файл и переименовать поверх старого.
    fn flush(&self) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(&self.inner.players_sorted_by_id())?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PlayerLedger for JsonFileLedger {
    fn find_or_create_player(&mut self, username: &str) -> Result<Player, LedgerError> {
        let existed = self.inner.get(username).is_some();
        let player = self.inner.find_or_create_player(username)?;
        if !existed {
            self.flush()?;
        }
        Ok(player)
    }

    fn update_player(&mut self, player: &Player) -> Result<(), LedgerError> {
        self.inner.update_player(player)?;
        self.flush()?;
        debug!(username = %player.username, chips = %player.chips, "saved player");
        Ok(())
    }

    fn leaderboard(&self, sort: LeaderboardSort) -> Result<Vec<Player>, LedgerError> {
        self.inner.leaderboard(sort)
    }
}
