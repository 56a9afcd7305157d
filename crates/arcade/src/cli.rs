//! Command-line interface for the arcade.

use arcade_core::{Difficulty, GameKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pocket Arcade - casual games in the terminal
#[derive(Parser, Debug)]
#[command(name = "arcade")]
#[command(about = "Casual single-player games in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (overrides ARCADE_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game interactively
    Play {
        /// Game to play (hangman, tic-tac-toe, memory, rock-paper-scissors, quiz)
        game: GameKind,

        /// Difficulty tier (easy, medium, hard); defaults to the configured tier
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Seed for reproducible content; defaults to the configured seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the stored best records of a game
    Best {
        /// Game whose records to show
        game: GameKind,
    },

    /// Toggle and print the persisted dark-mode flag
    Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_parses_kind_and_tier() {
        let cli = Cli::try_parse_from([
            "arcade",
            "play",
            "tic-tac-toe",
            "--difficulty",
            "hard",
            "--seed",
            "9",
        ])
        .unwrap();
        match cli.command {
            Command::Play {
                game,
                difficulty,
                seed,
            } => {
                assert_eq!(game, GameKind::TicTacToe);
                assert_eq!(difficulty, Some(Difficulty::Hard));
                assert_eq!(seed, Some(9));
            }
            other => panic!("Unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_game_is_an_error() {
        assert!(Cli::try_parse_from(["arcade", "best", "chess"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["arcade", "theme", "--config", "custom.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }
}
