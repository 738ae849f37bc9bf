use core::fmt;

use serde::{Deserialize, Serialize};

/// Действие игрока в своей очереди.
///
/// Текстовые команды чата (`!hit`, `!stand`) разбирает диспетчер;
/// движок работает только с этим enum.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    Hit,
    Stand,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Hit => f.write_str("hit"),
            PlayerAction::Stand => f.write_str("stand"),
        }
    }
}
