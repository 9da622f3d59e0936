use std::fs::File;
use std::io::{self, stdout, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
    widgets::*,
};
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use twenty48::{Board, Direction as MoveDirection, NoSpawn, RandomSpawner, DEFAULT_SIZE};

#[derive(Parser)]
struct Args {
    /// Number of rows
    #[arg(long, default_value_t = DEFAULT_SIZE.0 as u8, value_parser = clap::value_parser!(u8).range(1..))]
    height: u8,

    /// Number of columns
    #[arg(long, default_value_t = DEFAULT_SIZE.1 as u8, value_parser = clap::value_parser!(u8).range(1..))]
    width: u8,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Start from the grid in this JSON file (a list of rows) instead of a fresh board
    #[arg(long)]
    start_grid: Option<PathBuf>,

    /// Write logs to this file. The level can be set with RUST_LOG, default is "debug".
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        initialize_logging(path)?;
    }

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let spawner = RandomSpawner::seeded(seed);

    let board = match &args.start_grid {
        Some(path) => load_grid(path)?.with_new_spawner(spawner),
        None => Board::with_spawner(args.height.into(), args.width.into(), spawner),
    };
    let mut game = Game { board, moves: 0 };

    install_panic_hook();
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // The terminal must be restored before the error is reported
    let result = game.run(&mut terminal);

    restore_terminal()?;
    result
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

// Otherwise a panic message ends up on the alternate screen, in raw mode
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));
}

fn load_grid(path: &Path) -> anyhow::Result<Board<NoSpawn>> {
    let file = File::open(path).with_context(|| format!("Could not open '{}'", path.display()))?;
    let board = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("'{}' does not contain a valid grid", path.display()))?;
    Ok(board)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Move(MoveDirection),
    Quit,
}

fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Command::Quit);
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => Some(Command::Move(MoveDirection::Left)),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::Move(MoveDirection::Down)),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Move(MoveDirection::Up)),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::Move(MoveDirection::Right)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

fn handle_events() -> io::Result<Option<Command>> {
    if event::poll(std::time::Duration::from_millis(16))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(command_for_key(key));
            }
        }
    }
    Ok(None)
}

struct Game {
    board: Board,
    moves: usize,
}

impl Game {
    fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        loop {
            terminal.draw(|frame| self.ui(frame))?;
            match handle_events()? {
                Some(Command::Move(direction)) => self.apply(direction),
                Some(Command::Quit) => {
                    info!(moves = self.moves, max_tile = self.board.max_tile(), "Quit");
                    return Ok(());
                }
                None => {}
            }
        }
    }

    fn apply(&mut self, direction: MoveDirection) {
        if !self.board.make_move(direction) {
            debug!(%direction, "Nothing to move");
            return;
        }
        self.moves += 1;
        debug!(%direction, moves = self.moves, "Moved");
        if !self.board.has_legal_moves() {
            info!(moves = self.moves, max_tile = self.board.max_tile(), "Game over");
        }
    }

    fn ui(&self, frame: &mut Frame) {
        let board_text = self.board.to_string();
        let text_width = board_text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0) as u16;
        let text_height = board_text.lines().count() as u16;
        let title = if self.board.has_legal_moves() {
            " 2048 "
        } else {
            " Game over "
        };

        let main_layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Min(0),
                Constraint::Length(text_height + 2),
                Constraint::Length(2),
                Constraint::Min(0),
            ],
        )
        .split(frame.size());
        // One space of padding on each side, inside the border
        let board_width = (text_width + 4).max(title.len() as u16 + 2);
        let board_area = Layout::new(
            Direction::Horizontal,
            [
                Constraint::Min(0),
                Constraint::Length(board_width),
                Constraint::Min(0),
            ],
        )
        .split(main_layout[1])[1];

        let board = Paragraph::new(board_text).alignment(Alignment::Center).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .title(title),
        );
        frame.render_widget(board, board_area);

        let status = Paragraph::new(format!(
            "Moves: {}\nArrow keys or h/j/k/l to move the tiles, q to quit.",
            self.moves
        ))
        .alignment(Alignment::Center);
        frame.render_widget(status, main_layout[2]);
    }
}

fn initialize_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Could not create log file '{}'", path.display()))?;

    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .event_format(format),
        )
        .with(filter)
        .init();
    Ok(())
}
