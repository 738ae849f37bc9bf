// src/bin/blackjack_dev_cli.rs
//
// Консольный диспетчер: читает команды чата из stdin (`!blackjack 10`, `!hit`, ...)
// и печатает ответы движка. Подключение к чат-платформе сюда не входит.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use blackjack_engine::api::render;
use blackjack_engine::api::{ApiError, StartGameCommand};
use blackjack_engine::domain::Chips;
use blackjack_engine::engine::{PlayerAction, RandomSource};
use blackjack_engine::infra::{AnyRng, Config, InMemoryLedger, JsonFileLedger, LeaderboardSort, PlayerLedger};
use blackjack_engine::CasinoService;
use clap::Parser;
use tracing::{error, info, Level};

#[derive(Parser, Debug)]
#[command(name = "blackjack_dev_cli", about = "Play blackjack against the dealer from the console.")]
struct Args {
    /// JSON config (token, db_path, starting_chips, dealer_policy, log_level).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides log_level from the config.
    #[arg(long)]
    log_level: Option<String>,

    /// Fixed shuffle seed for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Keep players in memory instead of the db_path file.
    #[arg(long)]
    in_memory: bool,

    /// Username to play as (switch later with `!as <name>`).
    #[arg(long, default_value = "dev")]
    user: String,

    #[arg(long, default_value = "console")]
    channel: String,
}

/// Команда чата после разбора строки.
#[derive(Clone, Debug, PartialEq, Eq)]
enum ChatCommand {
    Start { wager: Chips, force: bool },
    Action(PlayerAction),
    Chips,
    Leaderboard(LeaderboardSort),
    As(String),
    Quit,
}

fn parse_line(line: &str) -> Result<Option<ChatCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    if !head.starts_with('!') {
        return Ok(None);
    }

    let cmd = match head.to_ascii_lowercase().as_str() {
        "!blackjack" | "!bj" => {
            let wager = words
                .next()
                .ok_or("usage: !blackjack <wager> [force]")?
                .parse::<u64>()
                .map_err(|_| "wager must be a whole number of chips".to_string())?;
            let force = matches!(words.next(), Some("force"));
            ChatCommand::Start {
                wager: Chips(wager),
                force,
            }
        }
        "!hit" => ChatCommand::Action(PlayerAction::Hit),
        "!stand" => ChatCommand::Action(PlayerAction::Stand),
        "!chips" => ChatCommand::Chips,
        "!leaderboard" => match words.next() {
            None | Some("wins") => ChatCommand::Leaderboard(LeaderboardSort::Wins),
            Some("chips") => ChatCommand::Leaderboard(LeaderboardSort::Chips),
            Some(other) => return Err(format!("unknown leaderboard: {other}")),
        },
        "!as" => ChatCommand::As(words.next().ok_or("usage: !as <username>")?.to_string()),
        "!quit" => ChatCommand::Quit,
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(Some(cmd))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!("[CLI] {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    if let Err(err) = config.validate() {
        eprintln!("[CLI] {err}");
        return ExitCode::FAILURE;
    }

    let level = Level::from_str(&config.log_level).unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let rng = AnyRng::from_optional_seed(args.seed);

    if args.in_memory {
        let ledger = InMemoryLedger::with_starting_chips(config.starting_chips());
        run(CasinoService::new(ledger, rng, config.dealer_policy), &args)
    } else {
        match JsonFileLedger::open(&config.db_path, config.starting_chips()) {
            Ok(ledger) => run(CasinoService::new(ledger, rng, config.dealer_policy), &args),
            Err(err) => {
                error!(path = %config.db_path.display(), %err, "failed to open player ledger");
                ExitCode::FAILURE
            }
        }
    }
}

fn run<L: PlayerLedger, R: RandomSource>(service: CasinoService<L, R>, args: &Args) -> ExitCode {
    info!(user = %args.user, policy = ?service.policy(), "blackjack dev CLI started");
    println!("Commands: !blackjack <wager> [force], !hit, !stand, !chips, !leaderboard [wins|chips], !as <name>, !quit");

    let mut user = args.user.clone();
    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!(%err, "stdin read failed");
                return ExitCode::FAILURE;
            }
        };

        let cmd = match parse_line(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                println!("{}", ApiError::BadRequest(msg).user_message());
                continue;
            }
        };

        let reply = match cmd {
            ChatCommand::Quit => break,
            ChatCommand::As(name) => {
                user = name;
                Ok(format!("Now playing as {user}."))
            }
            ChatCommand::Start { wager, force } => service
                .start_game(StartGameCommand {
                    player_key: user.clone(),
                    wager,
                    channel_key: format!("{}:{user}", args.channel),
                    force,
                })
                .map(|r| r.text),
            ChatCommand::Action(action) => service.apply_action(&user, action).map(|r| r.text),
            ChatCommand::Chips => service
                .chip_total(&user)
                .map(|chips| format!("{user}, you have {}.", render::chips_text(chips.0))),
            ChatCommand::Leaderboard(sort) => service
                .leaderboard(sort, Some(10))
                .map(|entries| render::leaderboard_text(&entries, sort)),
        };

        match reply {
            Ok(text) => println!("{text}\n"),
            Err(err) => println!("{}\n", err.user_message()),
        }
        let _ = io::stdout().flush();
    }

    println!("[CLI] bye.");
    ExitCode::SUCCESS
}
