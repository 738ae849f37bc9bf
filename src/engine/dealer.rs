use serde::{Deserialize, Serialize};

use crate::domain::hand::{Hand, DEALER_STAND};

/// Правило добора дилера.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DealerPolicy {
    /// Казино: добирает до 17, на мягких 17 тоже добирает.
    #[default]
    HitSoft17,
    /// Один на один: дилер видит руку игрока и добирает, пока проигрывает.
    /// При равенстве добирает только на мягкой руке или меньше 17.
    HeadToHead,
}

impl DealerPolicy {
    /// Должен ли дилер взять ещё одну карту.
    pub fn should_hit(&self, dealer: &Hand, player_value: u8) -> bool {
        if dealer.is_bust() {
            return false;
        }

        let value = dealer.value();
        match self {
            DealerPolicy::HitSoft17 => value < DEALER_STAND || dealer.is_soft_17(),
            DealerPolicy::HeadToHead => {
                if value < player_value {
                    true
                } else if value == player_value {
                    dealer.is_soft() || value < DEALER_STAND
                } else {
                    false
                }
            }
        }
    }
}
