//! Immutable view models handed to the presentation layer.

use serde::Serialize;

use crate::board::{Board, Mark, WinResult};
use crate::game::{GameState, HistoryEntry};

/// A history-panel entry: the step it jumps to and its button label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveDescription {
    pub step: usize,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub board: Board,
    pub status: String,
    pub winner: Option<WinResult>,
    pub to_move: Mark,
    /// Cells of the winning line, empty while the game is undecided.
    pub highlighted: Vec<usize>,
    pub hovered_step: Option<usize>,
    /// Cell played to reach the hovered history entry.
    pub over_btn_on_history: Option<usize>,
    pub current_step: usize,
    pub moves: Vec<MoveDescription>,
}

impl ViewModel {
    pub fn derive(state: &GameState) -> ViewModel {
        let board = *state.board();
        let winner = state.winner();
        let to_move = state.to_move();
        let over_btn_on_history = state
            .hovered_step()
            .and_then(|step| state.history()[step].origin_cell);

        ViewModel {
            board,
            status: status_text(&board, winner.as_ref(), to_move),
            winner,
            to_move,
            highlighted: winner.map(|w| w.positions.to_vec()).unwrap_or_default(),
            hovered_step: state.hovered_step(),
            over_btn_on_history,
            current_step: state.current_step(),
            moves: move_descriptions(state.history()),
        }
    }

    pub fn is_winning_cell(&self, index: usize) -> bool {
        self.highlighted.contains(&index)
    }

    pub fn is_hover_origin(&self, index: usize) -> bool {
        self.over_btn_on_history == Some(index)
    }

    /// Whether the presentation layer should draw `index` highlighted.
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.is_hover_origin(index) || self.is_winning_cell(index)
    }
}

pub fn status_text(board: &Board, winner: Option<&WinResult>, to_move: Mark) -> String {
    match winner {
        Some(win) => format!("Winner: {}", win.winner),
        None if board.is_full() => "No one wins".to_string(),
        None => format!("Next player: {}", to_move),
    }
}

/// Label for the history button at `step`; `origin_cell` is ignored for step 0.
pub fn describe_move(step: usize, origin_cell: Option<usize>) -> String {
    match origin_cell {
        Some(cell) if step > 0 => {
            let row = cell / 3 + 1;
            let column = cell % 3 + 1;
            format!("Go to move #{}({}, {})", step, column, row)
        }
        _ => "Go to game start".to_string(),
    }
}

pub fn move_descriptions(history: &[HistoryEntry]) -> Vec<MoveDescription> {
    history
        .iter()
        .enumerate()
        .map(|(step, entry)| MoveDescription {
            step,
            label: describe_move(step, entry.origin_cell),
        })
        .collect()
}
