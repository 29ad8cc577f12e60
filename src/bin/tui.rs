use std::io;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use sodium as na;
use tictactime::{Error, GameState, Intent, TicTacToe, ViewModel};
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};

fn main() -> io::Result<()> {
    let ctx = na::SodiumCtx::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (intents, ui) = ctx.transaction(|| {
        let intents: na::StreamSink<Intent> = ctx.new_stream_sink();

        let TicTacToe {
            state, view, error, ..
        } = TicTacToe::new(&ctx, &intents.stream());

        // Last rejected intent, cleared by the next accepted one.
        let message = error
            .map(|err: &Error| Some(err.to_string()))
            .or_else(&state.updates().map(|_: &GameState| None::<String>))
            .hold(None);

        (intents, Ui { view, message })
    });

    let result = run(&mut terminal, &intents, &ui);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    intents: &na::StreamSink<Intent>,
    ui: &Ui,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui.draw(f))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let view = ui.view.sample();
        let last_step = view.moves.len() - 1;
        let intent = match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Char('n') => Intent::NewGame,
            KeyCode::Char(c @ '1'..='9') => Intent::PlaceMark(c as usize - '1' as usize),
            KeyCode::Up => Intent::SetHover(
                view.hovered_step
                    .map_or(view.current_step, |step| step.saturating_sub(1)),
            ),
            KeyCode::Down => Intent::SetHover(
                view.hovered_step
                    .map_or(view.current_step, |step| (step + 1).min(last_step)),
            ),
            KeyCode::Enter => match view.hovered_step {
                Some(step) => Intent::JumpTo(step),
                None => continue,
            },
            KeyCode::Esc => Intent::ClearHover,
            _ => continue,
        };
        intents.send(intent);
    }
}

struct Ui {
    view: na::Cell<ViewModel>,
    message: na::Cell<Option<String>>,
}

impl Ui {
    fn draw<B: Backend>(&self, f: &mut Frame<B>) {
        let view = self.view.sample();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .margin(2)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
            .split(f.size());
        let block = Block::default().title("Board").borders(Borders::ALL);
        self.draw_board(f, &view, block.inner(chunks[0]));
        f.render_widget(block, chunks[0]);

        let block = Block::default().title("Game Info").borders(Borders::ALL);
        self.draw_info(f, &view, block.inner(chunks[1]));
        f.render_widget(block, chunks[1]);
    }

    fn draw_board<B: Backend>(&self, f: &mut Frame<B>, view: &ViewModel, area: Rect) {
        let thirds = [
            Constraint::Percentage(5),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(5),
        ];
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(thirds.as_ref())
            .split(area);

        for row in 0..3 {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .horizontal_margin(3)
                .constraints(thirds.as_ref())
                .split(rows[row + 1]);

            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match view.board.get(index) {
                    Some(mark) => mark.to_string(),
                    None => (index + 1).to_string(),
                };
                let style = if view.is_highlighted(index) {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else if view.board.get(index).is_none() {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };

                let square = Paragraph::new(symbol)
                    .alignment(Alignment::Center)
                    .style(style)
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(square, columns[col + 1]);
            }
        }
    }

    fn draw_info<B: Backend>(&self, f: &mut Frame<B>, view: &ViewModel, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(2)].as_ref())
            .split(area);

        let status = match self.message.sample() {
            Some(message) => format!("{}\n{}", view.status, message),
            None => view.status.clone(),
        };
        f.render_widget(Paragraph::new(status), chunks[0]);

        let items: Vec<ListItem> = view
            .moves
            .iter()
            .map(|entry| {
                let item = ListItem::new(format!("{}. {}", entry.step, entry.label));
                if entry.step == view.current_step {
                    item.style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    item
                }
            })
            .collect();
        let history = List::new(items)
            .block(Block::default().title("History").borders(Borders::TOP))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(view.hovered_step);
        f.render_stateful_widget(history, chunks[1], &mut state);

        f.render_widget(
            Paragraph::new("1-9 play  up/down browse  enter jump  esc unhover  n new  q quit")
                .style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );
    }
}
