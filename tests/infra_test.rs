// tests/infra_test.rs

use std::fs;
use std::path::PathBuf;

use blackjack_engine::{
    api::StartGameCommand,
    domain::{Chips, Player},
    engine::{DealerPolicy, PlayerAction, RandomSource},
    infra::{
        ids::IdGenerator,
        ledger::sort_players,
        Config, ConfigError, InMemoryLedger, JsonFileLedger, LeaderboardSort, LedgerError,
        PlayerLedger,
    },
    CasinoService,
};

/// Сдвиг колоды на 5: игрок 5♥ 4♥, дилер 3♥ 2♥; после stand дилер перебирает.
struct RotateRng(usize);

impl RandomSource for RotateRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        if !slice.is_empty() {
            let k = self.0 % slice.len();
            slice.rotate_left(k);
        }
    }
}

// ============================================================================
// IdGenerator
// ============================================================================

#[test]
fn id_generator_counts_from_one_and_resumes() {
    let ids = IdGenerator::new();
    assert_eq!(ids.next_player_id(), 1);
    assert_eq!(ids.next_player_id(), 2);
    assert_eq!(ids.next_game_id(), 1);

    let resumed = IdGenerator::starting_at(10, 3);
    assert_eq!(resumed.next_player_id(), 10);
    assert_eq!(resumed.next_game_id(), 3);
}

// ============================================================================
// InMemoryLedger
// ============================================================================

#[test]
fn in_memory_ledger_creates_players_once() {
    let mut ledger = InMemoryLedger::new();

    let alice = ledger.find_or_create_player("alice").unwrap();
    assert_eq!(alice.id, 1);
    assert_eq!(alice.chips, Chips::STARTING);
    assert_eq!(alice.games_played(), 0);

    let again = ledger.find_or_create_player("alice").unwrap();
    assert_eq!(again, alice);

    let bob = ledger.find_or_create_player("bob").unwrap();
    assert_eq!(bob.id, 2);
    assert_eq!(ledger.len(), 2);
}

#[test]
fn chip_total_creates_unknown_player() {
    let mut ledger = InMemoryLedger::with_starting_chips(Chips(100));
    assert!(ledger.is_empty());

    assert_eq!(ledger.chip_total("carol").unwrap(), Chips(100));
    assert!(ledger.get("carol").is_some());
}

#[test]
fn update_requires_existing_player() {
    let mut ledger = InMemoryLedger::new();

    let stranger = Player::new(99, "ghost", Chips(10));
    let err = ledger.update_player(&stranger).unwrap_err();
    assert!(matches!(err, LedgerError::PlayerNotFound(name) if name == "ghost"));

    let mut alice = ledger.find_or_create_player("alice").unwrap();
    alice.chips = Chips(75);
    alice.wins = 3;
    ledger.update_player(&alice).unwrap();
    assert_eq!(ledger.get("alice"), Some(&alice));
}

#[test]
fn leaderboard_sorts_descending_with_name_tiebreak() {
    let mut players = vec![
        Player {
            wins: 1,
            ..Player::new(1, "zed", Chips(90))
        },
        Player {
            wins: 4,
            ..Player::new(2, "amy", Chips(20))
        },
        Player {
            wins: 1,
            ..Player::new(3, "bea", Chips(90))
        },
    ];
    let ledger = InMemoryLedger::from_players(players.clone(), Chips::STARTING);

    let by_wins: Vec<String> = ledger
        .leaderboard(LeaderboardSort::Wins)
        .unwrap()
        .into_iter()
        .map(|p| p.username)
        .collect();
    assert_eq!(by_wins, vec!["amy", "bea", "zed"]);

    sort_players(&mut players, LeaderboardSort::Chips);
    let by_chips: Vec<&str> = players.iter().map(|p| p.username.as_str()).collect();
    assert_eq!(by_chips, vec!["bea", "zed", "amy"]);
}

#[test]
fn restored_ledger_continues_ids() {
    let mut ledger = InMemoryLedger::from_players(
        vec![Player::new(4, "alice", Chips(10)), Player::new(7, "bob", Chips(3))],
        Chips::STARTING,
    );

    assert_eq!(ledger.find_or_create_player("bob").unwrap().chips, Chips(3));
    assert_eq!(ledger.find_or_create_player("carol").unwrap().id, 8);
}

// ============================================================================
// JsonFileLedger
// ============================================================================

#[test]
fn json_ledger_starts_empty_when_file_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("players.json");

    let ledger = JsonFileLedger::open(&path, Chips::STARTING).unwrap();
    assert_eq!(ledger.path(), path.as_path());
    assert!(ledger.leaderboard(LeaderboardSort::Wins).unwrap().is_empty());
    assert!(!path.exists());
}

#[test]
fn json_ledger_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("players.json");

    {
        let mut ledger = JsonFileLedger::open(&path, Chips::STARTING).unwrap();
        let mut alice = ledger.find_or_create_player("alice").unwrap();
        alice.chips = Chips(65);
        alice.ties = 2;
        ledger.update_player(&alice).unwrap();
        ledger.find_or_create_player("bob").unwrap();
    }

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"alice\""));

    let mut reopened = JsonFileLedger::open(&path, Chips::STARTING).unwrap();
    let alice = reopened.find_or_create_player("alice").unwrap();
    assert_eq!(alice.chips, Chips(65));
    assert_eq!(alice.ties, 2);
    assert_eq!(alice.id, 1);

    let carol = reopened.find_or_create_player("carol").unwrap();
    assert_eq!(carol.id, 3);
}

#[test]
fn json_ledger_treats_blank_file_as_empty_and_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();

    let blank = dir.path().join("blank.json");
    fs::write(&blank, "  \n").unwrap();
    assert!(JsonFileLedger::open(&blank, Chips::STARTING).is_ok());

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{not json").unwrap();
    let err = JsonFileLedger::open(&broken, Chips::STARTING).unwrap_err();
    assert!(matches!(err, LedgerError::Json(_)));
}

#[test]
fn settled_game_is_saved_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("casino.json");

    {
        let ledger = JsonFileLedger::open(&path, Chips::STARTING).unwrap();
        let svc = CasinoService::new(ledger, RotateRng(5), DealerPolicy::HitSoft17);
        svc.start_game(StartGameCommand {
            player_key: "alice".into(),
            wager: Chips(10),
            channel_key: "c1".into(),
            force: false,
        })
        .unwrap();
        svc.apply_action("alice", PlayerAction::Stand).unwrap();
    }

    let mut ledger = JsonFileLedger::open(&path, Chips::STARTING).unwrap();
    let alice = ledger.find_or_create_player("alice").unwrap();
    assert_eq!(alice.chips, Chips(60));
    assert_eq!(alice.wins, 1);
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "Token": "secret",
            "DbPath": "data/casino.json",
            "starting_chips": 100,
            "dealer_policy": "head_to_head",
            "log_level": "debug"
        }"#,
    )
    .unwrap();

    let cfg = Config::load(&path).unwrap();
    assert_eq!(cfg.token.as_deref(), Some("secret"));
    assert_eq!(cfg.db_path, PathBuf::from("data/casino.json"));
    assert_eq!(cfg.starting_chips(), Chips(100));
    assert_eq!(cfg.dealer_policy, DealerPolicy::HeadToHead);
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn config_load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
