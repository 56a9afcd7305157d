//! Plain-text rendering of a session snapshot.

use arcade_core::{
    BoardRound, Counter, HandRound, HangmanRound, MemoryRound, Outcome, QuizRound, RoundState,
    Snapshot,
};
use std::fmt;
use strum::IntoEnumIterator;

/// Displays a snapshot as a block of text.
pub struct View<'a>(pub &'a Snapshot);

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        let theme = if *snapshot.dark_mode() { "dark" } else { "light" };
        writeln!(
            f,
            "== {} ({}) [{}] ==",
            snapshot.kind().title(),
            snapshot.difficulty(),
            theme
        )?;

        match snapshot.round() {
            RoundState::Hangman(round) => hangman(f, round)?,
            RoundState::TicTacToe(round) => board(f, round)?,
            RoundState::Memory(round) => memory(f, round, *snapshot.elapsed_seconds())?,
            RoundState::RockPaperScissors(round) => hand(f, round)?,
            RoundState::Quiz(round) => quiz(f, round)?,
        }

        let tallies: Vec<String> = Counter::iter()
            .filter_map(|c| snapshot.counters().get(&c).map(|n| format!("{c}: {n}")))
            .collect();
        if !tallies.is_empty() {
            writeln!(f, "Score  {}", tallies.join("  "))?;
        }

        if let Some(best) = snapshot.best() {
            write!(f, "Best   {} moves", best.moves())?;
            if *best.elapsed_seconds() > 0 {
                write!(f, " in {}s", best.elapsed_seconds())?;
            }
            writeln!(f)?;
        }
        if *snapshot.new_best() {
            writeln!(f, "New best score!")?;
        }

        match snapshot.outcome() {
            Outcome::InProgress => Ok(()),
            outcome => writeln!(f, "Round over: {outcome}. Type 'reset' to play again."),
        }
    }
}

fn hangman(f: &mut fmt::Formatter<'_>, round: &HangmanRound) -> fmt::Result {
    let masked: Vec<String> = round
        .masked()
        .into_iter()
        .map(|c| c.map_or("_".to_string(), |c| c.to_string()))
        .collect();
    writeln!(f, "{}", masked.join(" "))?;
    let guessed: String = round.guessed().iter().collect();
    writeln!(f, "Guessed: {}   Misses left: {}", guessed, round.remaining())?;
    if *round.outcome() == Outcome::Lost {
        writeln!(f, "The word was '{}'", round.word())?;
    }
    Ok(())
}

fn board(f: &mut fmt::Formatter<'_>, round: &BoardRound) -> fmt::Result {
    for (r, cells) in round.cells().chunks(3).enumerate() {
        let line: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(c, cell)| match cell {
                Some(mark) => mark.to_string(),
                None => (r * 3 + c).to_string(),
            })
            .collect();
        writeln!(f, " {} ", line.join(" | "))?;
    }
    match (round.outcome(), round.winner()) {
        (Outcome::Won, Some(mark)) => writeln!(f, "{mark} wins"),
        (Outcome::Draw, _) => writeln!(f, "Draw"),
        _ => writeln!(f, "{} to move", round.to_move()),
    }
}

fn memory(f: &mut fmt::Formatter<'_>, round: &MemoryRound, elapsed: u64) -> fmt::Result {
    let columns = if round.cards().len() > 12 { 6 } else { 4 };
    for row in round.cards().chunks(columns) {
        let line: Vec<String> = row
            .iter()
            .map(|card| {
                let id = *card.instance_id();
                if round.is_face_up(id) {
                    format!("[{:>2}:{:<2}]", id, card.pair_id())
                } else {
                    format!("[{:>2}:??]", id)
                }
            })
            .collect();
        writeln!(f, "{}", line.join(" "))?;
    }
    writeln!(
        f,
        "Moves: {}   Pairs: {}/{}   Time: {}s",
        round.moves(),
        round.matched_pairs().len(),
        round.pair_count(),
        elapsed
    )
}

fn hand(f: &mut fmt::Formatter<'_>, round: &HandRound) -> fmt::Result {
    match round.last() {
        Some(throw) => writeln!(
            f,
            "You threw {}, opponent threw {}: {}",
            throw.player(),
            throw.opponent(),
            throw.outcome()
        ),
        None => writeln!(f, "Throw rock, paper or scissors"),
    }
}

fn quiz(f: &mut fmt::Formatter<'_>, round: &QuizRound) -> fmt::Result {
    let Some(question) = round.current_question() else {
        return writeln!(
            f,
            "Final score: {}/{}",
            round.score(),
            round.questions().len()
        );
    };
    writeln!(
        f,
        "Question {}/{}: {}",
        round.current() + 1,
        round.questions().len(),
        question.prompt
    )?;
    for (index, option) in question.options.iter().enumerate() {
        let marker = if *round.selected() == Some(index) { '>' } else { ' ' };
        writeln!(f, "{marker} {index}. {option}")?;
    }
    writeln!(f, "Score: {}", round.score())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_core::{Difficulty, GameKind, GameSession, MemoryStore, Move};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(kind: GameKind) -> GameSession<StdRng, MemoryStore> {
        GameSession::new(kind, Difficulty::Easy, StdRng::seed_from_u64(3), MemoryStore::new())
    }

    #[test]
    fn test_board_shows_free_cells_and_winner() {
        let mut s = session(GameKind::TicTacToe);
        let text = View(&s.snapshot()).to_string();
        assert!(text.contains("== Tic Tac Toe (easy) [light] =="));
        assert!(text.contains(" 0 | 1 | 2 "));
        assert!(text.contains("X to move"));

        for cell in [0, 3, 1, 4, 2] {
            s.submit(Move::Place(cell));
        }
        let text = View(&s.snapshot()).to_string();
        assert!(text.contains(" X | X | X "));
        assert!(text.contains("X wins"));
        assert!(text.contains("XWins: 1"));
        assert!(text.contains("Round over: Won"));
    }

    #[test]
    fn test_hangman_masks_word() {
        let s = session(GameKind::Hangman);
        let snapshot = s.snapshot();
        let word_len = snapshot.round().as_hangman().unwrap().word().len();
        let text = View(&snapshot).to_string();
        assert!(text.contains(&vec!["_"; word_len].join(" ")));
        assert!(text.contains("Misses left: 6"));
    }

    #[test]
    fn test_memory_hides_cards() {
        let s = session(GameKind::Memory);
        let text = View(&s.snapshot()).to_string();
        assert_eq!(text.matches(":??]").count(), 8);
        assert!(text.contains("Pairs: 0/4"));
    }

    #[test]
    fn test_hand_throw_does_not_end_round() {
        let mut s = session(GameKind::RockPaperScissors);
        s.submit(Move::Throw(arcade_core::Hand::Rock));
        let text = View(&s.snapshot()).to_string();
        assert!(text.contains("You threw Rock"));
        assert!(!text.contains("Round over"));
    }

    #[test]
    fn test_quiz_marks_selection() {
        let mut s = session(GameKind::Quiz);
        s.submit(Move::Select(2));
        let text = View(&s.snapshot()).to_string();
        assert!(text.contains("Question 1/3: What is the capital of France?"));
        assert!(text.contains("> 2. Paris"));
    }
}
