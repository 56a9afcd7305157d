//! Pocket Arcade - terminal front end
//!
//! Plays the arcade games on stdin/stdout. Logs go to stderr.

#![warn(missing_docs)]

mod cli;
mod config;
mod driver;
mod render;

use anyhow::Result;
use arcade_core::{
    Difficulty, GameKind, GameSession, JsonFileStore, KeyValueStore, PersistenceGateway,
    Preferences,
};
use clap::Parser;
use cli::{Cli, Command};
use config::ArcadeConfig;
use driver::{ParseError, Reply, dispatch, parse_line};
use rand::SeedableRng;
use rand::rngs::StdRng;
use render::View;
use std::time::Duration;
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ArcadeConfig::load(cli.config.as_deref())?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Play {
            game,
            difficulty,
            seed,
        } => run_play(&config, game, difficulty, seed).await,
        Command::Best { game } => run_best(&config, game),
        Command::Theme => run_theme(&config),
    }
}

/// Run an interactive game until `quit` or end of input
#[instrument(skip(config))]
async fn run_play(
    config: &ArcadeConfig,
    game: GameKind,
    difficulty: Option<Difficulty>,
    seed: Option<u64>,
) -> Result<()> {
    let store = JsonFileStore::open(config.store_path())?;
    let difficulty = difficulty.unwrap_or(*config.default_difficulty());
    let rng = match seed.or(*config.seed()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut session = GameSession::new(game, difficulty, rng, store);
    println!("{}", View(&session.snapshot()));
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let period = Duration::from_millis((*config.tick_millis()).max(1));
    let mut clock = tokio::time::interval(period);
    clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();

    loop {
        tokio::select! {
            now = clock.tick() => {
                let waiting = revert_pending(&session);
                session.advance(now.duration_since(last));
                last = now;
                if waiting && !revert_pending(&session) {
                    println!("{}", View(&session.snapshot()));
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let action = match parse_line(&line) {
                    Ok(action) => action,
                    Err(ParseError::Empty) => continue,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };
                match dispatch(&mut session, action) {
                    Reply::Show => println!("{}", View(&session.snapshot())),
                    Reply::Say(message) => println!("{message}"),
                    Reply::Quit => break,
                }
            }
        }
    }

    session.close();
    info!("Goodbye");
    Ok(())
}

fn revert_pending<R: rand::Rng, S: KeyValueStore>(session: &GameSession<R, S>) -> bool {
    session
        .round()
        .as_memory()
        .is_some_and(|memory| memory.awaiting_revert())
}

/// Print the stored best records of a game
#[instrument(skip(config))]
fn run_best(config: &ArcadeConfig, game: GameKind) -> Result<()> {
    let Some(key) = game.best_score_key() else {
        println!("{} keeps no best records", game.title());
        return Ok(());
    };

    let gateway = PersistenceGateway::new(JsonFileStore::open(config.store_path())?);
    let bests = gateway.load_best_scores(key);
    println!("{} best records", game.title());
    for tier in Difficulty::iter() {
        match bests.get(&tier) {
            Some(record) if *record.elapsed_seconds() > 0 => println!(
                "  {tier:<6} {} moves in {}s",
                record.moves(),
                record.elapsed_seconds()
            ),
            Some(record) => println!("  {tier:<6} {} moves", record.moves()),
            None => println!("  {tier:<6} -"),
        }
    }
    Ok(())
}

/// Toggle the persisted theme
#[instrument(skip(config))]
fn run_theme(config: &ArcadeConfig) -> Result<()> {
    let mut gateway = PersistenceGateway::new(JsonFileStore::open(config.store_path())?);
    let mut preferences = Preferences::load(&gateway);
    preferences.toggle(&mut gateway);
    println!("Theme: {}", preferences.theme());
    Ok(())
}
