use std::num::ParseIntError;

use sodium::{Cell, CellLoop, SodiumCtx, Stream};
use thiserror::Error;

mod board;
mod game;
mod input;
mod view;

pub use board::{detect_winner, Board, Mark, WinResult, CELLS, LINES};
pub use game::{turn_of, GameState, HistoryEntry, Intent};
pub use input::{parse_intent, IntentParser};
pub use view::{describe_move, move_descriptions, status_text, MoveDescription, ViewModel};

#[derive(Clone, Debug, Error)]
pub enum Error {
    #[error("invalid index: {0}!")]
    InvalidIndex(usize),

    #[error("invalid step: {step} (history has {len} entries)!")]
    InvalidStep { step: usize, len: usize },

    #[error("invalid command: {0:?}!")]
    InvalidCommand(String),

    #[error("invalid input: {0}!")]
    InvalidInteger(ParseIntError),
}

/// The game as an event network: intents in, held state and view out.
pub struct TicTacToe {
    pub state: Cell<GameState>,
    pub view: Cell<ViewModel>,
    pub moves: Stream<(usize, Mark)>,
    pub winner: Stream<Mark>,
    pub error: Stream<Error>,
}

impl TicTacToe {
    pub fn new(ctx: &SodiumCtx, intents: &Stream<Intent>) -> TicTacToe {
        ctx.transaction(|| {
            let state_cell_loop: CellLoop<GameState> = ctx.new_cell_loop();
            let state_cell_fwd = state_cell_loop.cell();

            let (next_state_stream, error_stream) = intents
                .snapshot(&state_cell_fwd, |intent: &Intent, state: &GameState| {
                    state.apply(intent)
                })
                .split_res();
            let state_cell = next_state_stream.hold(GameState::new());
            state_cell_loop.loop_(&state_cell);

            // Snapshots see the state from before the intent was applied.
            let placed_stream = intents
                .snapshot(&state_cell, |intent: &Intent, state: &GameState| match intent {
                    Intent::PlaceMark(index) => state
                        .legal_move(*index)
                        .map(|mark| (*index, mark, state.board().mark(*index, mark))),
                    _ => None,
                })
                .filter_option();

            let move_stream =
                placed_stream.map(|(index, mark, _): &(usize, Mark, Board)| (*index, *mark));
            let winner_stream = placed_stream
                .map(|(_, _, board): &(usize, Mark, Board)| board.get_winner())
                .filter_option();

            let view_cell = state_cell.map(|state: &GameState| state.view());

            TicTacToe {
                state: state_cell,
                view: view_cell,
                moves: move_stream,
                winner: winner_stream,
                error: error_stream,
            }
        })
    }
}
