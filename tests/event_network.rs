use std::sync::{Arc, Mutex};

use sodium::{SodiumCtx, StreamSink};
use tictactime::{Error, Intent, IntentParser, Mark, TicTacToe};

fn collect<T>(stream: &sodium::Stream<T>) -> (Arc<Mutex<Vec<T>>>, sodium::Listener)
where
    T: Clone + Send + Sync + 'static,
{
    let seen = Arc::new(Mutex::new(Vec::new()));
    let listener = stream.listen({
        let seen = seen.clone();
        move |value: &T| seen.lock().unwrap().push(value.clone())
    });
    (seen, listener)
}

#[test]
fn intents_drive_state_and_view() {
    let ctx = SodiumCtx::new();
    let intents: StreamSink<Intent> = ctx.new_stream_sink();
    let game = TicTacToe::new(&ctx, &intents.stream());

    assert_eq!(game.view.sample().status, "Next player: X");

    intents.send(Intent::PlaceMark(4));
    intents.send(Intent::PlaceMark(0));
    let view = game.view.sample();
    assert_eq!(view.current_step, 2);
    assert_eq!(view.board.get(4), Some(Mark::X));
    assert_eq!(view.board.get(0), Some(Mark::O));
    assert_eq!(view.status, "Next player: X");

    intents.send(Intent::JumpTo(1));
    assert_eq!(game.state.sample().current_step(), 1);
    assert_eq!(game.view.sample().status, "Next player: O");
}

#[test]
fn accepted_moves_and_wins_are_streamed() {
    let ctx = SodiumCtx::new();
    let intents: StreamSink<Intent> = ctx.new_stream_sink();
    let game = TicTacToe::new(&ctx, &intents.stream());
    let (moves, _moves_listener) = collect(&game.moves);
    let (winners, _winner_listener) = collect(&game.winner);

    for cell in [0, 3, 3, 1, 4, 2] {
        intents.send(Intent::PlaceMark(cell));
    }
    // Game is over, this one is dropped.
    intents.send(Intent::PlaceMark(8));

    assert_eq!(
        *moves.lock().unwrap(),
        vec![(0, Mark::X), (3, Mark::O), (1, Mark::X), (4, Mark::O), (2, Mark::X)]
    );
    assert_eq!(*winners.lock().unwrap(), vec![Mark::X]);
    assert_eq!(game.view.sample().highlighted, vec![0, 1, 2]);
}

#[test]
fn rejected_intents_leave_state_alone() {
    let ctx = SodiumCtx::new();
    let intents: StreamSink<Intent> = ctx.new_stream_sink();
    let game = TicTacToe::new(&ctx, &intents.stream());
    let (errors, _listener) = collect(&game.error);

    intents.send(Intent::PlaceMark(4));
    let before = game.state.sample();
    intents.send(Intent::JumpTo(7));
    intents.send(Intent::SetHover(2));

    assert_eq!(game.state.sample(), before);
    let errors = errors.lock().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0], Error::InvalidStep { step: 7, len: 2 }));
}

#[test]
fn typed_commands_reach_the_game() {
    let ctx = SodiumCtx::new();
    let kb_input: StreamSink<String> = ctx.new_stream_sink();
    let (game, parse_errors) = ctx.transaction(|| {
        let parser = IntentParser::new(&kb_input.stream());
        (TicTacToe::new(&ctx, &parser.intents), parser.error)
    });
    let (errors, _listener) = collect(&parse_errors);

    for line in ["5", "place 1", "", "bogus", "hover 1"] {
        kb_input.send(line.to_string());
    }

    let view = game.view.sample();
    assert_eq!(view.board.get(4), Some(Mark::X));
    assert_eq!(view.board.get(0), Some(Mark::O));
    assert_eq!(view.over_btn_on_history, Some(4));
    assert_eq!(errors.lock().unwrap().len(), 1);
}
