//! Доменная модель блэкджека: карты, колода, руки, фишки, игроки.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod player;

pub type PlayerId = u64;
pub type GameId = u64;

/// Ключ игрока в реестре партий (username в чате).
pub type PlayerKey = String;

/// Ключ канала/треда, в котором идёт партия.
pub type ChannelKey = String;

pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
