use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, error, info};
use ratatui::{prelude::*, widgets::*};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use snekgrid::config::{self, GameConfig};
use snekgrid::{Direction, FileStore, Intent, Pos, RunState, Session, SnakeEngine, Snapshot};

/// Terminal columns per grid cell, so cells come out roughly square.
const CELL_WIDTH: u16 = 2;

#[derive(Parser, Debug)]
#[command(name = "snekgrid", version, about = "Snake on a fixed grid, in the terminal")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value_t = config::DEFAULT_WIDTH)]
    width: u16,

    /// Grid height in cells
    #[arg(long, default_value_t = config::DEFAULT_HEIGHT)]
    height: u16,

    /// Snake length at the start of each game
    #[arg(long, default_value_t = config::DEFAULT_INITIAL_LENGTH)]
    length: u16,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = config::DEFAULT_TICK_RATE.as_millis() as u64)]
    tick_ms: u64,

    /// Where the high score is kept
    #[arg(long, default_value = config::HIGH_SCORE_FILE)]
    high_score_file: PathBuf,

    #[arg(long, default_value = config::LOG_FILE)]
    log_file: PathBuf,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,

    /// Seed for apple placement, random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            initial_length: self.length,
            tick_rate: Duration::from_millis(self.tick_ms),
            high_score_path: self.high_score_file.clone(),
            log_path: self.log_file.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.game_config();

    // Set up logging before anything else, stdout belongs to the game
    let log_file = File::create(&config.log_path)
        .with_context(|| format!("Failed to create log file {}", config.log_path.display()))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let engine = match cli.seed {
        Some(seed) => SnakeEngine::with_seed(&config, seed),
        None => SnakeEngine::new(&config),
    }
    .context("Invalid game configuration")?;
    let mut session = Session::new(engine, FileStore::new(&config.high_score_path));

    info!("Starting snekgrid, high score {}", session.high_score());

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut session, config.tick_rate);
    let restored = restore_terminal(&mut terminal);

    first_error(result, restored)
}

/// The game loop's error wins; a restore failure behind it is only logged.
fn first_error(result: Result<()>, restored: Result<()>) -> Result<()> {
    match (result, restored) {
        (Err(e), Err(restore_err)) => {
            error!("Failed to restore terminal: {:#}", restore_err);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), restored) => restored,
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    session: &mut Session<FileStore>,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| render(frame, session))?;

        // Keys only queue intents, the tick applies them
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match command_for(key) {
                        Some(Command::Quit) => break,
                        Some(Command::Play(intent)) => session.push(intent),
                        None => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if session.tick().ate_apple() {
                ring_bell();
            }
            last_tick = Instant::now();
        }
    }

    info!("Exiting, high score {}", session.high_score());
    Ok(())
}

enum Command {
    Play(Intent),
    Quit,
}

fn command_for(key: KeyEvent) -> Option<Command> {
    let intent = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return Some(Command::Quit),
        KeyCode::Up | KeyCode::Char('w') => Intent::SetDirection(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Intent::SetDirection(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Intent::SetDirection(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Intent::SetDirection(Direction::Right),
        KeyCode::Char(' ') | KeyCode::Char('p') => Intent::TogglePause,
        KeyCode::Char('r') => Intent::Restart,
        _ => return None,
    };
    Some(Command::Play(intent))
}

fn ring_bell() {
    if let Err(e) = execute!(io::stdout(), Print('\u{7}')) {
        debug!("Could not ring the bell: {}", e);
    }
}

fn render(frame: &mut Frame, session: &Session<FileStore>) {
    let snapshot = session.snapshot();

    let layout = Layout::default()
        .direction(layout::Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Scores
            Constraint::Min(0),    // Board
        ])
        .split(frame.area());

    frame.render_widget(
        Paragraph::new(format!(
            "SNEK    High Score: {}    Score: {}",
            session.high_score(),
            snapshot.score
        ))
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL)),
        layout[0],
    );

    let board_area = Rect {
        width: layout[1]
            .width
            .min(snapshot.size.width.saturating_mul(CELL_WIDTH).saturating_add(2)),
        height: layout[1]
            .height
            .min(snapshot.size.height.saturating_add(2)),
        ..layout[1]
    };

    let title = match snapshot.run_state {
        RunState::Running => "Playing",
        RunState::Paused => "Paused. Press SPACE to continue",
        RunState::GameOver => "Game Over",
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner_area = block.inner(board_area);

    frame.render_widget(block, board_area);
    frame.render_widget(Board(snapshot), inner_area);

    if snapshot.run_state == RunState::GameOver {
        frame.render_widget(
            Paragraph::new(format!(
                "GAME OVER\nFinal Score: {}\nHigh Score: {}\nPress SPACE to play again",
                snapshot.score,
                session.high_score()
            ))
            .alignment(Alignment::Center)
            .bold(),
            inner_area,
        );
    }
}

struct Board<'a>(Snapshot<'a>);

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.0;

        paint_cell(area, buf, snapshot.apple, Color::LightRed);
        for (i, pos) in snapshot.snake.iter().enumerate().rev() {
            let color = if i == 0 { Color::Yellow } else { Color::Green };
            paint_cell(area, buf, *pos, color);
        }
    }
}

/// Fills one grid cell, skipping anything the terminal is too small to show.
fn paint_cell(area: Rect, buf: &mut Buffer, pos: Pos, color: Color) {
    let x = area.x.saturating_add(pos.x.saturating_mul(CELL_WIDTH));
    let y = area.y.saturating_add(pos.y);
    if y >= area.bottom() || x.saturating_add(CELL_WIDTH) > area.right() {
        return;
    }

    for dx in 0..CELL_WIDTH {
        buf[(x + dx, y)].set_symbol(" ").set_bg(color);
    }
}
