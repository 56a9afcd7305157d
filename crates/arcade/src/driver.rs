//! Turns typed command lines into session calls.

use arcade_core::{Difficulty, GameSession, Hand, KeyValueStore, Move, MoveOutcome};
use derive_more::{Display, Error};
use rand::Rng;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Help text for the play loop.
pub const HELP: &str = "\
Commands:
  guess <letter>      word guessing: guess a letter
  place <cell>        tic-tac-toe: mark a cell (0-8, row by row)
  flip <card>         memory: turn a card over
  throw <hand>        rock paper scissors: rock, paper or scissors
  pick <option>       quiz: select an option
  next                quiz: lock in the selection
  reset               start a new round
  difficulty <tier>   switch to easy, medium or hard
  scores              reset the session counters
  theme               toggle dark mode
  show                redraw the game
  help                show this help
  quit                leave the game";

/// A parsed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A game move.
    Play(Move),
    /// Start a new round.
    Reset,
    /// Switch tier.
    Difficulty(Difficulty),
    /// Clear the session counters.
    ResetScores,
    /// Toggle dark mode.
    Theme,
    /// Redraw.
    Show,
    /// Print help.
    Help,
    /// Leave.
    Quit,
}

/// Why a command line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseError {
    /// Blank line.
    #[display("Nothing entered")]
    Empty,

    /// First word is not a command.
    #[display("Unknown command '{}', try 'help'", _0)]
    Unknown(#[error(not(source))] String),

    /// Command needs an argument that was not given.
    #[display("'{}' needs {}", command, expected)]
    MissingArgument {
        /// The command word.
        command: &'static str,
        /// What the argument should be.
        expected: &'static str,
    },

    /// Argument did not parse.
    #[display("'{}' is not {}", value, expected)]
    BadArgument {
        /// The argument as typed.
        value: String,
        /// What the argument should be.
        expected: &'static str,
    },
}

/// Parses one command line.
#[instrument]
pub fn parse_line(line: &str) -> Result<Action, ParseError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Err(ParseError::Empty);
    };
    let argument = words.next();

    let action = match command.to_ascii_lowercase().as_str() {
        "guess" | "g" => {
            let value = required(argument, "guess", "a letter")?;
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) => Action::Play(Move::Guess(letter)),
                _ => return Err(bad(value, "a single letter")),
            }
        }
        "place" | "p" => Action::Play(Move::Place(number(argument, "place", "a cell number")?)),
        "flip" | "f" => Action::Play(Move::Flip(number(argument, "flip", "a card number")?)),
        "throw" | "t" => {
            let value = required(argument, "throw", "rock, paper or scissors")?;
            let hand = Hand::from_str(value).map_err(|_| bad(value, "rock, paper or scissors"))?;
            Action::Play(Move::Throw(hand))
        }
        "pick" => Action::Play(Move::Select(number(argument, "pick", "an option number")?)),
        "next" | "n" => Action::Play(Move::Advance),
        "reset" | "r" => Action::Reset,
        "difficulty" | "d" => {
            let value = required(argument, "difficulty", "easy, medium or hard")?;
            let tier = Difficulty::from_str(value).map_err(|_| bad(value, "easy, medium or hard"))?;
            Action::Difficulty(tier)
        }
        "scores" => Action::ResetScores,
        "theme" => Action::Theme,
        "show" | "s" => Action::Show,
        "help" | "h" | "?" => Action::Help,
        "quit" | "q" | "exit" => Action::Quit,
        _ => return Err(ParseError::Unknown(command.to_string())),
    };
    debug!(?action, "Parsed command");
    Ok(action)
}

fn required<'a>(
    argument: Option<&'a str>,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, ParseError> {
    argument.ok_or(ParseError::MissingArgument { command, expected })
}

fn number(
    argument: Option<&str>,
    command: &'static str,
    expected: &'static str,
) -> Result<usize, ParseError> {
    let value = required(argument, command, expected)?;
    value.parse().map_err(|_| bad(value, expected))
}

fn bad(value: &str, expected: &'static str) -> ParseError {
    ParseError::BadArgument {
        value: value.to_string(),
        expected,
    }
}

/// What the play loop should do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Redraw the game.
    Show,
    /// Print a message.
    Say(String),
    /// Leave the loop.
    Quit,
}

/// Applies an action to the session.
#[instrument(skip(session))]
pub fn dispatch<R: Rng, S: KeyValueStore>(
    session: &mut GameSession<R, S>,
    action: Action,
) -> Reply {
    match action {
        Action::Play(mv) => match session.submit(mv) {
            MoveOutcome::Applied => Reply::Show,
            MoveOutcome::Rejected(rejection) => Reply::Say(rejection.to_string()),
        },
        Action::Reset => {
            session.reset();
            Reply::Show
        }
        Action::Difficulty(tier) => {
            session.set_difficulty(tier);
            Reply::Show
        }
        Action::ResetScores => {
            session.reset_counters();
            Reply::Say("Scores reset".to_string())
        }
        Action::Theme => {
            let dark = session.toggle_theme();
            Reply::Say(format!("Dark mode {}", if dark { "on" } else { "off" }))
        }
        Action::Show => Reply::Show,
        Action::Help => Reply::Say(HELP.to_string()),
        Action::Quit => Reply::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_core::{Counter, GameKind, MemoryStore};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_parses_moves() {
        assert_eq!(parse_line("guess E"), Ok(Action::Play(Move::Guess('E'))));
        assert_eq!(parse_line("  place 4 "), Ok(Action::Play(Move::Place(4))));
        assert_eq!(parse_line("flip 11"), Ok(Action::Play(Move::Flip(11))));
        assert_eq!(
            parse_line("throw Scissors"),
            Ok(Action::Play(Move::Throw(Hand::Scissors)))
        );
        assert_eq!(parse_line("pick 2"), Ok(Action::Play(Move::Select(2))));
        assert_eq!(parse_line("next"), Ok(Action::Play(Move::Advance)));
    }

    #[test]
    fn test_parses_session_commands() {
        assert_eq!(parse_line("difficulty hard"), Ok(Action::Difficulty(Difficulty::Hard)));
        assert_eq!(parse_line("RESET"), Ok(Action::Reset));
        assert_eq!(parse_line("q"), Ok(Action::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_line("   "), Err(ParseError::Empty));
        assert_eq!(
            parse_line("dance"),
            Err(ParseError::Unknown("dance".to_string()))
        );
        assert!(matches!(
            parse_line("place"),
            Err(ParseError::MissingArgument { command: "place", .. })
        ));
        assert!(matches!(
            parse_line("guess ab"),
            Err(ParseError::BadArgument { .. })
        ));
        assert!(matches!(
            parse_line("throw lizard"),
            Err(ParseError::BadArgument { .. })
        ));
    }

    #[test]
    fn test_dispatch_reports_rejections() {
        let mut session = GameSession::new(
            GameKind::TicTacToe,
            Difficulty::Easy,
            StdRng::seed_from_u64(1),
            MemoryStore::new(),
        );
        assert_eq!(dispatch(&mut session, Action::Play(Move::Place(0))), Reply::Show);
        assert_eq!(
            dispatch(&mut session, Action::Play(Move::Place(0))),
            Reply::Say("Cell 0 is already occupied".to_string())
        );
        assert_eq!(
            dispatch(&mut session, Action::Play(Move::Guess('a'))),
            Reply::Say("Move does not belong to tic-tac-toe".to_string())
        );
        assert_eq!(dispatch(&mut session, Action::Quit), Reply::Quit);
    }

    #[test]
    fn test_dispatch_theme_and_scores() {
        let mut session = GameSession::new(
            GameKind::RockPaperScissors,
            Difficulty::Easy,
            StdRng::seed_from_u64(1),
            MemoryStore::new(),
        );
        dispatch(&mut session, Action::Play(Move::Throw(Hand::Rock)));
        assert_eq!(
            dispatch(&mut session, Action::ResetScores),
            Reply::Say("Scores reset".to_string())
        );
        assert_eq!(session.ledger().count(Counter::Wins), 0);
        assert_eq!(
            dispatch(&mut session, Action::Theme),
            Reply::Say("Dark mode on".to_string())
        );
    }
}
