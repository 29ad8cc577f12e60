//! Authoritative game history and the reducer that advances it.
//!
//! A [`GameState`] never stores whose turn it is: the mark to play is
//! always [`turn_of`] the current step.

use tracing::{debug, instrument};

use crate::board::{detect_winner, Board, Mark, WinResult, CELLS};
use crate::view::ViewModel;
use crate::Error;

/// A user request to change the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    PlaceMark(usize),
    JumpTo(usize),
    SetHover(usize),
    ClearHover,
    NewGame,
}

/// One snapshot in the history, together with the cell played to reach it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub board: Board,
    pub origin_cell: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    history: Vec<HistoryEntry>,
    current_step: usize,
    hovered_step: Option<usize>,
}

/// X moves from even steps, O from odd ones.
pub fn turn_of(step: usize) -> Mark {
    if step % 2 == 0 {
        Mark::X
    } else {
        Mark::O
    }
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            history: vec![HistoryEntry {
                board: Board::new(),
                origin_cell: None,
            }],
            current_step: 0,
            hovered_step: None,
        }
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn hovered_step(&self) -> Option<usize> {
        self.hovered_step
    }

    /// The live board, selected by the current step.
    pub fn board(&self) -> &Board {
        &self.history[self.current_step].board
    }

    pub fn to_move(&self) -> Mark {
        turn_of(self.current_step)
    }

    pub fn winner(&self) -> Option<WinResult> {
        detect_winner(self.board())
    }

    pub fn is_concluded(&self) -> bool {
        self.winner().is_some() || self.board().is_full()
    }

    /// The mark that would land on `index`, if playing there is allowed.
    pub fn legal_move(&self, index: usize) -> Option<Mark> {
        let board = self.board();
        if detect_winner(board).is_some() || !board.is_empty_at(index) {
            None
        } else {
            Some(self.to_move())
        }
    }

    /// Places the next mark at `index`.
    ///
    /// Returns `Ok(false)` without touching the state when the cell is taken
    /// or the live board is already decided.
    pub fn place_mark(&mut self, index: usize) -> Result<bool, Error> {
        if index >= CELLS {
            return Err(Error::InvalidIndex(index));
        }
        let Some(mark) = self.legal_move(index) else {
            debug!(index, step = self.current_step, "ignoring illegal move");
            return Ok(false);
        };

        let board = *self.board();
        self.history.truncate(self.current_step + 1);
        self.history.push(HistoryEntry {
            board: board.mark(index, mark),
            origin_cell: Some(index),
        });
        self.current_step = self.history.len() - 1;
        if self.hovered_step.is_some_and(|step| step >= self.history.len()) {
            self.hovered_step = None;
        }
        Ok(true)
    }

    pub fn jump_to(&mut self, step: usize) -> Result<(), Error> {
        self.check_step(step)?;
        self.current_step = step;
        Ok(())
    }

    pub fn set_hover(&mut self, step: Option<usize>) -> Result<(), Error> {
        if let Some(step) = step {
            self.check_step(step)?;
        }
        self.hovered_step = step;
        Ok(())
    }

    pub fn clear_hover(&mut self) {
        self.hovered_step = None;
    }

    /// Discards the whole session and starts over from an empty board.
    pub fn reset(&mut self) {
        *self = GameState::new();
    }

    /// Pure reducer: the state that results from handling `intent`.
    #[instrument(level = "trace", skip(self), fields(step = self.current_step))]
    pub fn apply(&self, intent: &Intent) -> Result<GameState, Error> {
        let mut next = self.clone();
        match *intent {
            Intent::PlaceMark(index) => {
                next.place_mark(index)?;
            }
            Intent::JumpTo(step) => next.jump_to(step)?,
            Intent::SetHover(step) => next.set_hover(Some(step))?,
            Intent::ClearHover => next.clear_hover(),
            Intent::NewGame => next.reset(),
        }
        Ok(next)
    }

    pub fn view(&self) -> ViewModel {
        ViewModel::derive(self)
    }

    fn check_step(&self, step: usize) -> Result<(), Error> {
        if step < self.history.len() {
            Ok(())
        } else {
            Err(Error::InvalidStep {
                step,
                len: self.history.len(),
            })
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
