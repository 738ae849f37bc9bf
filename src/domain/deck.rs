use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::RandomSource;

/// Попытка взять карту из пустой колоды.
///
/// В одной партии колода не может закончиться (максимум ~11 карт на руку),
/// так что это всегда нарушение инварианта, а не игровая ситуация.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("В колоде не осталось карт")]
pub struct EmptyDeckError;

/// Колода карт. Верх колоды: последний элемент вектора.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода: Hearts A..K, Clubs A..K, Diamonds A..K, Spades A..K.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    /// Колода из заранее заданных карт (верх: последний элемент).
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Перемешать колоду на месте через переданный RNG.
    pub fn shuffle<R: RandomSource>(&mut self, rng: &mut R) {
        rng.shuffle(&mut self.cards);
    }

    /// Снять верхнюю карту.
    pub fn deal_top(&mut self) -> Result<Card, EmptyDeckError> {
        self.cards.pop().ok_or(EmptyDeckError)
    }
}
