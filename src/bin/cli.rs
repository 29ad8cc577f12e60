use std::io::BufRead;

use clap::Parser;
use sodium::{SodiumCtx, StreamSink};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tictactime::{Error, Intent, IntentParser, Mark, TicTacToe, ViewModel};

/// Tic-tac-toe with a time-travelling move history.
///
/// Commands: `<1-9>` or `place <1-9>`, `jump <step>`, `hover <step>`,
/// `unhover`, `new`.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Print every view as a line of JSON instead of a drawn board.
    #[arg(long)]
    json: bool,

    /// Comma separated cells (1-9) to play before reading input.
    #[arg(long, value_delimiter = ',')]
    replay: Vec<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let json = args.json;

    let ctx = SodiumCtx::new();

    let (intents, kb_input, view, _listeners) = ctx.transaction(|| {
        let mut listeners = Vec::new();

        let intents: StreamSink<Intent> = ctx.new_stream_sink();
        let kb_input: StreamSink<String> = ctx.new_stream_sink();

        let parser = IntentParser::new(&kb_input.stream());
        let all_intents = intents.stream().or_else(&parser.intents);
        let game = TicTacToe::new(&ctx, &all_intents);

        listeners.push(parser.error.listen(|err: &Error| println!("{}", err)));
        listeners.push(game.error.listen(|err: &Error| println!("{}", err)));

        listeners.push(game.moves.listen(|(index, mark): &(usize, Mark)| {
            info!(cell = index + 1, %mark, "mark placed")
        }));
        listeners.push(game.winner.listen(|mark: &Mark| info!(%mark, "game won")));

        listeners.push(
            game.view
                .updates()
                .listen(move |view: &ViewModel| render(view, json)),
        );

        (intents, kb_input, game.view, listeners)
    });

    render(&view.sample(), json);
    for cell in args.replay {
        intents.send(tictactime::parse_intent(&cell.to_string())?);
    }

    let stdin = std::io::stdin().lock();
    for line in stdin.lines() {
        kb_input.send(line?);
    }
    Ok(())
}

fn render(view: &ViewModel, json: bool) {
    if json {
        match serde_json::to_string(view) {
            Ok(line) => println!("{}", line),
            Err(err) => eprintln!("failed to encode view: {}", err),
        }
        return;
    }

    println!();
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let index = row * 3 + col;
                let symbol = match view.board.get(index) {
                    Some(mark) => mark.to_string(),
                    None => " ".to_string(),
                };
                if view.is_highlighted(index) {
                    format!("[{}]", symbol)
                } else {
                    format!(" {} ", symbol)
                }
            })
            .collect();
        println!("{}", cells.join("|"));
        if row < 2 {
            println!("---+---+---");
        }
    }
    println!("{}", view.status);
    for entry in &view.moves {
        let marker = if entry.step == view.current_step { ">" } else { " " };
        println!("{} {}. {}", marker, entry.step, entry.label);
    }
}
