use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{ChannelKey, PlayerKey};
use crate::engine::actions::PlayerAction;

/// Команда верхнего уровня (то, что диспетчер чата присылает движку).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Начать новую партию.
    StartGame(StartGameCommand),

    /// Hit / stand в текущей партии игрока.
    Action(ActionCommand),

    /// Бросить партию (игрок ушёл, тред удалён). Ставка сгорает.
    Abandon { player_key: PlayerKey },
}

/// Старт партии.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StartGameCommand {
    pub player_key: PlayerKey,
    pub wager: Chips,
    /// Канал/тред, куда диспетчер будет писать ответы.
    pub channel_key: ChannelKey,
    /// Бросить текущую партию игрока (ставка по ней сгорает).
    #[serde(default)]
    pub force: bool,
}

/// Действие игрока в партии.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionCommand {
    pub player_key: PlayerKey,
    pub action: PlayerAction,
}
