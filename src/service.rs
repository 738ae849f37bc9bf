//! Фасад для диспетчера чата: старт партии, hit/stand, баланс, лидерборд.
//!
//! Реестр, хранилище игроков и RNG лежат под мьютексами, поэтому два
//! одновременных действия над одной партией выполняются строго по очереди.
//! Порядок захвата: registry → ledger → rng.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::api::render;
use crate::api::{
    build_game_view, build_leaderboard, ApiError, Command, CommandResponse, GameReply, GameView,
    LeaderboardEntry, Query, QueryResponse, StartGameCommand,
};
use crate::domain::{Chips, Player};
use crate::engine::{
    self, apply_forfeit, apply_settlement, ChipUpdate, DealerPolicy, GameEngine, GameRegistry,
    GameStatus, PlayerAction, RandomSource,
};
use crate::infra::ids::IdGenerator;
use crate::infra::ledger::{LeaderboardSort, PlayerLedger};

pub struct CasinoService<L: PlayerLedger, R: RandomSource> {
    registry: Mutex<GameRegistry>,
    ledger: Mutex<L>,
    rng: Mutex<R>,
    ids: IdGenerator,
    policy: DealerPolicy,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, ApiError> {
    mutex
        .lock()
        .map_err(|_| ApiError::Internal("poisoned lock".to_string()))
}

impl<L: PlayerLedger, R: RandomSource> CasinoService<L, R> {
    pub fn new(ledger: L, rng: R, policy: DealerPolicy) -> Self {
        Self {
            registry: Mutex::new(GameRegistry::new()),
            ledger: Mutex::new(ledger),
            rng: Mutex::new(rng),
            ids: IdGenerator::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DealerPolicy {
        self.policy
    }

    /// Выполнить команду диспетчера.
    pub fn handle_command(&self, command: Command) -> Result<CommandResponse, ApiError> {
        match command {
            Command::StartGame(cmd) => self.start_game(cmd).map(CommandResponse::Game),
            Command::Action(cmd) => self
                .apply_action(&cmd.player_key, cmd.action)
                .map(CommandResponse::Game),
            Command::Abandon { player_key } => self.abandon(&player_key),
        }
    }

    /// Ответить на запрос "только чтение".
    pub fn handle_query(&self, query: Query) -> Result<QueryResponse, ApiError> {
        match query {
            Query::GetGame { player_key } => Ok(QueryResponse::Game(self.find_game(&player_key)?)),
            Query::GetGameByChannel { channel_key } => Ok(QueryResponse::Game(
                self.find_game_by_channel(&channel_key)?,
            )),
            Query::ChipTotal { username } => {
                let chips = self.chip_total(&username)?;
                Ok(QueryResponse::ChipTotal { username, chips })
            }
            Query::Leaderboard { sort, limit } => {
                Ok(QueryResponse::Leaderboard(self.leaderboard(sort, limit)?))
            }
        }
    }

    /// Начать партию.
    ///
    /// Ставка проверяется по балансу *после* списания брошенной партии,
    /// и до любых изменений: при отказе ничего не меняется.
    pub fn start_game(&self, cmd: StartGameCommand) -> Result<GameReply, ApiError> {
        let StartGameCommand {
            player_key,
            wager,
            channel_key,
            force,
        } = cmd;

        if player_key.trim().is_empty() {
            return Err(ApiError::BadRequest("empty player key".to_string()));
        }
        if wager.is_zero() {
            warn!(player = %player_key, "rejected zero wager");
            return Err(ApiError::InvalidWager);
        }

        let mut registry = lock(&self.registry)?;

        if registry.contains(&player_key) && !force {
            warn!(player = %player_key, "game already in progress");
            return Err(ApiError::AlreadyInProgress(player_key));
        }
        if let Some(other) = registry.find_by_channel(&channel_key) {
            if other.player_key() != player_key {
                warn!(player = %player_key, channel = %channel_key, "channel occupied");
                return Err(ApiError::ChannelOccupied(channel_key));
            }
        }

        let mut ledger = lock(&self.ledger)?;
        let mut player = ledger.find_or_create_player(&player_key)?;

        let prior_wager = if force {
            registry.find(&player_key).map(|g| g.wager)
        } else {
            None
        };
        let forfeit = prior_wager.map(|w| apply_forfeit(&mut player, w));

        if !player.can_cover(wager) {
            warn!(player = %player_key, %wager, balance = %player.chips, "insufficient chips");
            return Err(ApiError::InsufficientChips {
                wager,
                balance: player.chips,
            });
        }

        let game = {
            let mut rng = lock(&self.rng)?;
            engine::start_game(
                self.ids.next_game_id(),
                player.clone(),
                wager,
                channel_key,
                self.policy,
                &mut *rng,
            )?
        };
        let game_id = game.game_id;

        if let Some(old) = registry.start(player_key.clone(), game, force)? {
            ledger.update_player(&player)?;
            info!(
                player = %player_key,
                game_id = old.game_id,
                wager = %old.wager,
                balance = %player.chips,
                "forfeited previous game"
            );
        }

        info!(player = %player_key, game_id, %wager, "game started");

        let mut text = String::new();
        if let Some(update) = &forfeit {
            text.push_str(&render::forfeit_message(&player_key, update));
            text.push_str("\n\n");
        }

        let settled = registry
            .find(&player_key)
            .map(GameEngine::is_settled)
            .unwrap_or(false);

        if settled {
            let (game, update) = self.finish_game(&mut registry, &mut *ledger, &player_key)?;
            text.push_str(&render::started_text(&game));
            text.push_str("\n\n");
            text.push_str(&render::chip_message(&player_key, &update));
            return Ok(GameReply {
                text,
                view: build_game_view(&game),
                ended: true,
                chips: Some(update),
            });
        }

        let game = registry
            .find(&player_key)
            .ok_or_else(|| ApiError::Internal("game vanished after start".to_string()))?;
        text.push_str(&render::started_text(game));

        Ok(GameReply {
            text,
            view: build_game_view(game),
            ended: false,
            chips: None,
        })
    }

    /// Hit / stand. Если партия закончилась: итог сразу учитывается в балансе.
    pub fn apply_action(&self, player_key: &str, action: PlayerAction) -> Result<GameReply, ApiError> {
        let mut registry = lock(&self.registry)?;

        let status = registry.apply_action(player_key, action).map_err(|err| {
            warn!(player = %player_key, %action, %err, "action rejected");
            ApiError::from(err)
        })?;
        debug!(player = %player_key, %action, finished = status.is_finished(), "action applied");

        match status {
            GameStatus::Ongoing => {
                let game = registry
                    .find(player_key)
                    .ok_or_else(|| ApiError::NoActiveGame(player_key.to_string()))?;
                Ok(GameReply {
                    text: render::action_text(game, action),
                    view: build_game_view(game),
                    ended: false,
                    chips: None,
                })
            }
            GameStatus::Finished(_) => {
                let mut ledger = lock(&self.ledger)?;
                let (game, update) = self.finish_game(&mut registry, &mut *ledger, player_key)?;
                let text = format!(
                    "{}\n\n{}",
                    render::action_text(&game, action),
                    render::chip_message(player_key, &update)
                );
                Ok(GameReply {
                    text,
                    view: build_game_view(&game),
                    ended: true,
                    chips: Some(update),
                })
            }
        }
    }

    /// Бросить партию: ставка сгорает (с полом в 1 фишку), как при `force`.
    pub fn abandon(&self, player_key: &str) -> Result<CommandResponse, ApiError> {
        let mut registry = lock(&self.registry)?;
        let wager = registry
            .find(player_key)
            .map(|g| g.wager)
            .ok_or_else(|| ApiError::NoActiveGame(player_key.to_string()))?;

        let mut ledger = lock(&self.ledger)?;
        let mut player = ledger.find_or_create_player(player_key)?;
        let update = apply_forfeit(&mut player, wager);
        ledger.update_player(&player)?;

        let game = registry
            .end(player_key)
            .ok_or_else(|| ApiError::NoActiveGame(player_key.to_string()))?;

        info!(
            player = %player_key,
            game_id = game.game_id,
            %wager,
            balance = %update.after,
            "game abandoned, wager forfeited"
        );

        Ok(CommandResponse::Abandoned {
            player_key: player_key.to_string(),
            text: render::forfeit_message(player_key, &update),
            chips: update,
        })
    }

    pub fn find_game(&self, player_key: &str) -> Result<Option<GameView>, ApiError> {
        let registry = lock(&self.registry)?;
        Ok(registry.find(player_key).map(build_game_view))
    }

    pub fn find_game_by_channel(&self, channel_key: &str) -> Result<Option<GameView>, ApiError> {
        let registry = lock(&self.registry)?;
        Ok(registry.find_by_channel(channel_key).map(build_game_view))
    }

    pub fn active_games(&self) -> Result<usize, ApiError> {
        Ok(lock(&self.registry)?.len())
    }

    /// Игрок из хранилища (создаётся при первом обращении).
    pub fn player(&self, username: &str) -> Result<Player, ApiError> {
        Ok(lock(&self.ledger)?.find_or_create_player(username)?)
    }

    pub fn chip_total(&self, username: &str) -> Result<Chips, ApiError> {
        Ok(lock(&self.ledger)?.chip_total(username)?)
    }

    pub fn leaderboard(
        &self,
        sort: LeaderboardSort,
        limit: Option<usize>,
    ) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let players = lock(&self.ledger)?.leaderboard(sort)?;
        Ok(build_leaderboard(&players, limit))
    }

    /// Учесть итог рассчитанной партии и снять её с учёта.
    fn finish_game(
        &self,
        registry: &mut GameRegistry,
        ledger: &mut L,
        player_key: &str,
    ) -> Result<(GameEngine, ChipUpdate), ApiError> {
        let summary = registry
            .find(player_key)
            .and_then(|g| g.summary.clone())
            .ok_or_else(|| ApiError::Internal("finished game without summary".to_string()))?;

        let mut player = ledger.find_or_create_player(player_key)?;
        let update = apply_settlement(&mut player, &summary);
        ledger.update_player(&player)?;

        let game = registry
            .end(player_key)
            .ok_or_else(|| ApiError::NoActiveGame(player_key.to_string()))?;

        info!(
            player = %player_key,
            game_id = game.game_id,
            outcome = ?summary.outcome,
            player_value = summary.player_value,
            dealer_value = summary.dealer_value,
            delta = update.applied_delta,
            balance = %update.after,
            mercy = update.mercy_applied,
            "game settled"
        );

        Ok((game, update))
    }
}
