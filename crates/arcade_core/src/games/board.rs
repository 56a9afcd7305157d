//! Tic-tac-toe rules.

use super::{Outcome, Rejection};
use derive_getters::Getters;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// A mark on the board. X moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, strum::Display)]
pub enum Mark {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// The eight lines that win, as cell indices in row-major order.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // Rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // Columns
    [0, 4, 8], [2, 4, 6],             // Diagonals
];

/// Returns the first completed line and its owner, scanning [`WIN_LINES`] in order.
pub fn winning_line(cells: &[Option<Mark>; 9]) -> Option<(Mark, [usize; 3])> {
    WIN_LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        match (cells[a], cells[b], cells[c]) {
            (Some(p1), Some(p2), Some(p3)) if p1 == p2 && p2 == p3 => Some((p1, line)),
            _ => None,
        }
    })
}

/// One tic-tac-toe round, played hot-seat by both marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct BoardRound {
    /// Cells in row-major order (0-8).
    cells: [Option<Mark>; 9],
    /// Mark that places next.
    to_move: Mark,
    /// Round status.
    outcome: Outcome,
    /// Winner, once the round is won.
    winner: Option<Mark>,
    /// Cells of the completed line, once the round is won.
    line: Option<[usize; 3]>,
}

impl BoardRound {
    /// Creates an empty board with X to move.
    pub fn new() -> Self {
        Self {
            cells: [None; 9],
            to_move: Mark::X,
            outcome: Outcome::InProgress,
            winner: None,
            line: None,
        }
    }

    /// Places the next mark on `cell`.
    ///
    /// # Errors
    ///
    /// Rejects moves after the round ended, off the board, or on an occupied cell.
    #[instrument(skip(self), fields(mark = %self.to_move))]
    pub fn place(&mut self, cell: usize) -> Result<(), Rejection> {
        if self.outcome.is_terminal() {
            return Err(Rejection::RoundOver);
        }
        let slot = self.cells.get(cell).ok_or(Rejection::OffBoard(cell))?;
        if slot.is_some() {
            return Err(Rejection::CellOccupied(cell));
        }

        self.cells[cell] = Some(self.to_move);

        if let Some((mark, line)) = winning_line(&self.cells) {
            info!(%mark, ?line, "Three in a row");
            self.outcome = Outcome::Won;
            self.winner = Some(mark);
            self.line = Some(line);
        } else if self.cells.iter().all(Option::is_some) {
            info!("Board full, draw");
            self.outcome = Outcome::Draw;
        } else {
            self.to_move = self.to_move.opponent();
            debug!(next = %self.to_move, "Turn passes");
        }
        Ok(())
    }

    /// Returns true if `cell` is on the board and empty.
    pub fn is_open(&self, cell: usize) -> bool {
        matches!(self.cells.get(cell), Some(None))
    }
}

impl Default for BoardRound {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(cells: &[usize]) -> BoardRound {
        let mut round = BoardRound::new();
        for &cell in cells {
            round.place(cell).unwrap();
        }
        round
    }

    #[test]
    fn test_top_row_reports_line() {
        let mut cells = [None; 9];
        cells[0] = Some(Mark::X);
        cells[1] = Some(Mark::X);
        cells[2] = Some(Mark::X);
        assert_eq!(winning_line(&cells), Some((Mark::X, [0, 1, 2])));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut cells = [None; 9];
        cells[0] = Some(Mark::X);
        cells[1] = Some(Mark::X);
        cells[2] = Some(Mark::O);
        assert_eq!(winning_line(&cells), None);
    }

    #[test]
    fn test_win_on_third_mark() {
        let round = play(&[0, 3, 1, 4, 2]);
        assert_eq!(*round.outcome(), Outcome::Won);
        assert_eq!(*round.winner(), Some(Mark::X));
        assert_eq!(*round.line(), Some([0, 1, 2]));
    }

    #[test]
    fn test_diagonal_win_for_o() {
        let round = play(&[1, 0, 2, 4, 3, 8]);
        assert_eq!(*round.winner(), Some(Mark::O));
        assert_eq!(*round.line(), Some([0, 4, 8]));
    }

    #[test]
    fn test_draw_when_full() {
        // X O X / X O O / O X X
        let round = play(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(*round.outcome(), Outcome::Draw);
        assert_eq!(*round.winner(), None);
    }

    #[test]
    fn test_occupied_and_off_board_rejected() {
        let mut round = play(&[4]);
        let before = round.clone();
        assert_eq!(round.place(4), Err(Rejection::CellOccupied(4)));
        assert_eq!(round.place(9), Err(Rejection::OffBoard(9)));
        assert_eq!(round, before);
    }

    #[test]
    fn test_no_moves_after_win() {
        let mut round = play(&[0, 3, 1, 4, 2]);
        let before = round.clone();
        assert_eq!(round.place(8), Err(Rejection::RoundOver));
        assert_eq!(round, before);
    }

    #[test]
    fn test_marks_alternate() {
        let round = play(&[0]);
        assert_eq!(*round.to_move(), Mark::O);
        assert!(!round.is_open(0));
        assert!(round.is_open(1));
    }
}
