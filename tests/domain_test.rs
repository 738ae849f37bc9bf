//! Интеграционные тесты для доменной модели (crate::domain).

use std::collections::HashSet;

use blackjack_engine::domain::*;

fn cards(short: &[&str]) -> Vec<Card> {
    short
        .iter()
        .map(|s| s.parse::<Card>().expect("valid card notation"))
        .collect()
}

fn hand(short: &[&str]) -> Hand {
    Hand::from_cards(cards(short))
}

/// Базовые стоимости рангов.
#[test]
fn rank_base_values() {
    assert_eq!(Rank::Ace.base_value(), 1);
    assert_eq!(Rank::Two.base_value(), 2);
    assert_eq!(Rank::Nine.base_value(), 9);
    assert_eq!(Rank::Ten.base_value(), 10);
    assert_eq!(Rank::Jack.base_value(), 10);
    assert_eq!(Rank::Queen.base_value(), 10);
    assert_eq!(Rank::King.base_value(), 10);
}

/// Card: длинный Display для чата и короткий FromStr.
#[test]
fn card_display_and_parse() {
    let ace: Card = "Ah".parse().unwrap();
    assert_eq!(ace, Card::new(Rank::Ace, Suit::Hearts));
    assert_eq!(ace.to_string(), "Ace of Hearts");

    let ten: Card = "ts".parse().unwrap();
    assert_eq!(ten.to_string(), "Ten of Spades");

    assert!("".parse::<Card>().is_err());
    assert!("A".parse::<Card>().is_err());
    assert!("Ahh".parse::<Card>().is_err());
    assert!("1h".parse::<Card>().is_err());
    assert!("Ax".parse::<Card>().is_err());
}

#[test]
fn hand_values_with_aces() {
    assert_eq!(hand(&["Ah", "As"]).value(), 12);
    assert_eq!(hand(&["Ah", "Kd"]).value(), 21);
    assert_eq!(hand(&["Th", "9c", "Kd"]).value(), 29);
    assert_eq!(hand(&["Ah", "Ad", "9c"]).value(), 21);
    assert_eq!(hand(&["Ah", "Ad", "Ac", "As"]).value(), 14);
    assert_eq!(hand(&["Ah", "9d", "5c"]).value(), 15);
    assert_eq!(hand(&[]).value(), 0);
}

/// Жадное повышение тузов совпадает с лучшим назначением {1, 11} без перебора.
#[test]
fn greedy_ace_promotion_matches_best_assignment() {
    let all_ranks = Rank::ALL;
    for &a in &all_ranks {
        for &b in &all_ranks {
            for &c in &all_ranks {
                let h = Hand::from_cards(vec![
                    Card::new(a, Suit::Hearts),
                    Card::new(b, Suit::Clubs),
                    Card::new(c, Suit::Spades),
                ]);

                let base: u32 = h.cards.iter().map(|c| u32::from(c.base_value())).sum();
                let aces = h.cards.iter().filter(|c| c.is_ace()).count() as u32;
                let best = (0..=aces)
                    .map(|high| base + 10 * high)
                    .filter(|v| *v <= 21)
                    .max()
                    .unwrap_or(base);

                assert_eq!(u32::from(h.value()), best, "hand {h}");
            }
        }
    }
}

#[test]
fn soft_seventeen_detection() {
    assert!(hand(&["Ah", "6c"]).is_soft_17());
    assert!(hand(&["Ah", "3c", "3d"]).is_soft_17());
    assert!(!hand(&["Kh", "7c"]).is_soft_17());
    // A + 6 + K: туз вынужденно за 1, это жёсткие 17.
    assert!(!hand(&["Ah", "6c", "Kd"]).is_soft_17());
    assert!(!hand(&["Ah", "7c"]).is_soft_17());

    assert!(hand(&["Ah", "7c"]).is_soft());
    assert!(!hand(&["Ah", "7c", "9d"]).is_soft());
}

#[test]
fn bust_and_twenty_one() {
    assert!(hand(&["Th", "Qc", "2d"]).is_bust());
    assert!(!hand(&["Th", "Qc", "Ad"]).is_bust());
    assert!(hand(&["Th", "Qc", "Ad"]).is_twenty_one());
}

#[test]
fn hand_display_lists_cards_line_by_line() {
    let h = hand(&["Ah", "Kd"]);
    assert_eq!(h.to_string(), "Ace of Hearts,\nKing of Diamonds");
}

#[test]
fn standard_deck_has_52_unique_cards() {
    let deck = Deck::standard_52();
    assert_eq!(deck.len(), 52);

    let unique: HashSet<Card> = deck.cards.iter().copied().collect();
    assert_eq!(unique.len(), 52);

    for suit in Suit::ALL {
        for rank in Rank::ALL {
            assert!(unique.contains(&Card::new(rank, suit)));
        }
    }
}

#[test]
fn deal_top_takes_last_card_and_fails_on_empty() {
    let mut deck = Deck::from_cards(cards(&["2h", "Kd"]));

    assert_eq!(deck.deal_top(), Ok("Kd".parse::<Card>().unwrap()));
    assert_eq!(deck.deal_top(), Ok("2h".parse::<Card>().unwrap()));
    assert!(deck.is_empty());
    assert_eq!(deck.deal_top(), Err(EmptyDeckError));
}

#[test]
fn player_starts_clean() {
    let p = Player::new(7, "alice", Chips::STARTING);
    assert_eq!(p.chips, Chips(50));
    assert_eq!(p.games_played(), 0);
    assert!(p.can_cover(Chips(50)));
    assert!(!p.can_cover(Chips(51)));
}
