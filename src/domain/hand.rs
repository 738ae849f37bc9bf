use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

/// Максимальное «хорошее» значение руки.
pub const BLACKJACK: u8 = 21;

/// Порог дилера: мягкие/жёсткие 17.
pub const DEALER_STAND: u8 = 17;

/// Чья это рука.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Party {
    Player,
    Dealer,
}

/// Стоимость набора карт и признак «мягкости».
///
/// Тузы считаются по 1, затем по одному повышаются до 11 (+10),
/// пока сумма не превышает 21. Мягкая рука: хотя бы один туз посчитан как 11.
pub fn hand_value(cards: &[Card]) -> (u8, bool) {
    let mut value: u16 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        value += u16::from(card.base_value());
        if card.is_ace() {
            aces += 1;
        }
    }

    let mut soft = false;
    while aces > 0 && value + 10 <= u16::from(BLACKJACK) {
        value += 10;
        aces -= 1;
        soft = true;
    }

    (value.min(u16::from(u8::MAX)) as u8, soft)
}

/// Рука одного участника (игрока или дилера).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn first(&self) -> Option<&Card> {
        self.cards.first()
    }

    pub fn value(&self) -> u8 {
        hand_value(&self.cards).0
    }

    /// Хотя бы один туз сейчас считается за 11.
    pub fn is_soft(&self) -> bool {
        hand_value(&self.cards).1
    }

    pub fn is_soft_17(&self) -> bool {
        let (value, soft) = hand_value(&self.cards);
        soft && value == DEALER_STAND
    }

    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    pub fn is_twenty_one(&self) -> bool {
        self.value() == BLACKJACK
    }
}

impl fmt::Display for Hand {
    /// Карты через запятую, по одной на строку.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(",\n")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
