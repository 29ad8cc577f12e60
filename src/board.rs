use std::fmt;

use serde::Serialize;

/// The eight index triples that win the game, in scan order.
pub const LINES: [[usize; 3]; 8] = [
    // Horizontal
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Vertical
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonal
    [0, 4, 8],
    [2, 4, 6],
];

pub const CELLS: usize = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn swap(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

/// Snapshot of the 3x3 grid, cells in row-major order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Board {
    squares: [Option<Mark>; CELLS],
}

/// A completed line: who made it and where it is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WinResult {
    pub winner: Mark,
    pub positions: [usize; 3],
}

impl Board {
    pub fn new() -> Self {
        let squares = [None; CELLS];
        Self { squares }
    }

    pub fn from_cells(squares: [Option<Mark>; CELLS]) -> Self {
        Self { squares }
    }

    /// Returns a copy of this board with `mark` placed at `index`.
    pub fn mark(&self, index: usize, mark: Mark) -> Board {
        let mut new_board = *self;
        new_board.squares[index] = Some(mark);
        new_board
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.squares.get(index).copied().flatten()
    }

    pub fn cells(&self) -> &[Option<Mark>; CELLS] {
        &self.squares
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        matches!(self.squares.get(index), Some(None))
    }

    pub fn is_full(&self) -> bool {
        self.squares.iter().all(Option::is_some)
    }

    pub fn get_winner(&self) -> Option<Mark> {
        detect_winner(self).map(|win| win.winner)
    }
}

/// Scans [`LINES`] in order and reports the first one held by a single mark.
pub fn detect_winner(board: &Board) -> Option<WinResult> {
    LINES.iter().find_map(|&[a, b, c]| {
        let first = board.squares[a]?;
        if board.squares[b] == Some(first) && board.squares[c] == Some(first) {
            Some(WinResult {
                winner: first,
                positions: [a, b, c],
            })
        } else {
            None
        }
    })
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let ds: Vec<String> = (0..3)
                .map(|col| {
                    let index = row * 3 + col;
                    match self.squares[index] {
                        Some(mark) => mark.to_string(),
                        None => (index + 1).to_string(),
                    }
                })
                .collect();
            writeln!(f, " {} | {} | {}", ds[0], ds[1], ds[2])?;
            if row < 2 {
                f.write_str("---+---+---\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cells: &str) -> Board {
        let mut squares = [None; CELLS];
        for (square, c) in squares.iter_mut().zip(cells.chars()) {
            *square = match c {
                'X' => Some(Mark::X),
                'O' => Some(Mark::O),
                _ => None,
            };
        }
        Board::from_cells(squares)
    }

    #[test]
    fn every_line_is_detected_with_its_positions() {
        for line in LINES {
            let mut b = Board::new();
            for index in line {
                b = b.mark(index, Mark::O);
            }
            let win = detect_winner(&b).unwrap();
            assert_eq!(win.winner, Mark::O);
            assert_eq!(win.positions, line);
        }
    }

    #[test]
    fn mixed_line_is_not_a_win() {
        assert_eq!(detect_winner(&board("XXO......")), None);
        assert_eq!(detect_winner(&Board::new()), None);
    }

    #[test]
    fn first_line_in_scan_order_wins() {
        // Row 0 and column 0 both complete.
        let win = detect_winner(&board("XXXX..X..")).unwrap();
        assert_eq!(win.positions, [0, 1, 2]);
    }

    #[test]
    fn full_board_without_line() {
        let b = board("XOXXOOOXX");
        assert!(b.is_full());
        assert_eq!(b.get_winner(), None);
    }

    #[test]
    fn mark_leaves_original_untouched() {
        let b = Board::new();
        let next = b.mark(4, Mark::X);
        assert!(b.is_empty_at(4));
        assert_eq!(next.get(4), Some(Mark::X));
        assert!(!next.is_empty_at(4));
        assert!(!next.is_empty_at(9));
    }

    #[test]
    fn display_shows_top_row_first() {
        let b = Board::new().mark(0, Mark::X).mark(8, Mark::O);
        let expected = " X | 2 | 3\n---+---+---\n 4 | 5 | 6\n---+---+---\n 7 | 8 | O\n";
        assert_eq!(b.to_string(), expected);
    }
}
