// tests/registry_tests.rs
//
// Реестр партий: одна партия на игрока, один игрок на канал, force.

use blackjack_engine::domain::{Card, Chips, Deck, Player};
use blackjack_engine::engine::{
    start_game_with_deck, DealerPolicy, EngineError, GameEngine, GameRegistry, GameStatus,
    PlayerAction,
};

fn game(id: u64, username: &str, channel: &str) -> GameEngine {
    // P: Ts 6h (16), D: 9c 9d (18), дальше Kd.
    let mut cards: Vec<Card> = ["Ts", "6h", "9c", "9d", "Kd", "2c"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    cards.reverse();

    start_game_with_deck(
        id,
        Player::new(id, username, Chips(50)),
        Chips(10),
        channel.to_string(),
        DealerPolicy::HitSoft17,
        Deck::from_cards(cards),
    )
    .unwrap()
}

#[test]
fn second_start_without_force_is_rejected() {
    let mut registry = GameRegistry::new();
    assert!(registry
        .start("alice".into(), game(1, "alice", "c1"), false)
        .unwrap()
        .is_none());

    let err = registry
        .start("alice".into(), game(2, "alice", "c1"), false)
        .unwrap_err();
    assert_eq!(err, EngineError::AlreadyInProgress("alice".into()));

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.find("alice").map(|g| g.game_id), Some(1));
}

#[test]
fn force_replaces_and_returns_previous_game() {
    let mut registry = GameRegistry::new();
    registry
        .start("alice".into(), game(1, "alice", "c1"), false)
        .unwrap();

    let old = registry
        .start("alice".into(), game(2, "alice", "c2"), true)
        .unwrap()
        .expect("previous game is handed back");

    assert_eq!(old.game_id, 1);
    assert_eq!(old.wager, Chips(10));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.find("alice").map(|g| g.game_id), Some(2));

    // Старый канал освобождён, новый указывает на новую партию.
    assert!(registry.find_by_channel("c1").is_none());
    assert_eq!(registry.find_by_channel("c2").map(|g| g.game_id), Some(2));
}

#[test]
fn channel_belongs_to_one_player() {
    let mut registry = GameRegistry::new();
    registry
        .start("alice".into(), game(1, "alice", "c1"), false)
        .unwrap();

    let err = registry
        .start("bob".into(), game(2, "bob", "c1"), false)
        .unwrap_err();
    assert_eq!(err, EngineError::ChannelOccupied("c1".into()));
    assert!(!registry.contains("bob"));

    registry
        .start("bob".into(), game(3, "bob", "c2"), false)
        .unwrap();
    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.find_by_channel("c1").map(|g| g.player_key()),
        Some("alice")
    );
    assert_eq!(
        registry.find_by_channel("c2").map(|g| g.player_key()),
        Some("bob")
    );
}

#[test]
fn end_clears_player_and_channel() {
    let mut registry = GameRegistry::new();
    registry
        .start("alice".into(), game(1, "alice", "c1"), false)
        .unwrap();

    let ended = registry.end("alice").expect("game was active");
    assert_eq!(ended.game_id, 1);
    assert!(registry.is_empty());
    assert!(registry.find_by_channel("c1").is_none());
    assert!(registry.end("alice").is_none());

    // Канал снова свободен.
    registry
        .start("bob".into(), game(2, "bob", "c1"), false)
        .unwrap();
    assert_eq!(registry.find_by_channel("c1").map(|g| g.game_id), Some(2));
}

#[test]
fn action_without_game_is_reported() {
    let mut registry = GameRegistry::new();
    assert_eq!(
        registry.apply_action("ghost", PlayerAction::Hit),
        Err(EngineError::NoActiveGame("ghost".into()))
    );
}

#[test]
fn settled_game_stays_until_ended() {
    let mut registry = GameRegistry::new();
    registry
        .start("alice".into(), game(1, "alice", "c1"), false)
        .unwrap();

    // 16 + K = 26: перебор.
    let status = registry.apply_action("alice", PlayerAction::Hit).unwrap();
    assert!(matches!(status, GameStatus::Finished(_)));
    assert!(registry.contains("alice"));
    assert_eq!(
        registry.apply_action("alice", PlayerAction::Stand),
        Err(EngineError::InvalidAction)
    );

    registry.end("alice");
    assert!(!registry.contains("alice"));
}

#[test]
fn find_mut_reaches_the_stored_game() {
    let mut registry = GameRegistry::new();
    registry
        .start("alice".into(), game(1, "alice", "c1"), false)
        .unwrap();

    let g = registry.find_mut("alice").expect("game exists");
    assert!(g.is_player_turn());
    assert_eq!(registry.keys().cloned().collect::<Vec<_>>(), vec!["alice".to_string()]);
}
