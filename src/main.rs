use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::{prelude::*, widgets::*};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;
use std::time::{Duration, Instant};

mod direction;
mod food;
mod grid;
mod highscore;
mod particles;
mod sched;
mod session;
mod snek;
mod ui;

use direction::Direction;
use grid::Grid;
use highscore::HighScore;
use sched::{Handle, Scheduler};
use session::{Session, StepResult};

const CLOCK_PERIOD: Duration = Duration::from_secs(1);
const IDLE_POLL: Duration = Duration::from_millis(150);

fn main() -> Result<(), io::Error> {
    // Set up logging before anything else
    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        File::create("slither.log")?,
    )
    .expect("Failed to initialize logger");

    info!("Starting Slither");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    loop {
        terminal.draw(|f| app.render(f))?;

        // Block on input until the next scheduled tick is due.
        let timeout = app
            .ticker
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        for tick in app.ticker.poll(Instant::now()) {
            app.on_tick(tick);
        }

        if let GameState::Exit = app.state {
            break;
        }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tick {
    Step,
    Clock,
}

/// The two periodic actions of a run: the simulation step at the current
/// level's period, and the 1 Hz play clock. Pausing cancels both handles;
/// starting cancels any leftovers first, so a stale tick from an earlier run
/// can never execute against fresh state.
#[derive(Debug, Default)]
struct Ticker {
    scheduler: Scheduler,
    step: Option<Handle>,
    clock: Option<Handle>,
}

impl Ticker {
    fn start(&mut self, step_period: Duration) {
        self.stop();
        let now = Instant::now();
        self.step = Some(self.scheduler.schedule(step_period, now));
        self.clock = Some(self.scheduler.schedule(CLOCK_PERIOD, now));
    }

    fn stop(&mut self) {
        if let Some(handle) = self.step.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.clock.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Level went up: swap the step task for one at the new period.
    fn retime_step(&mut self, period: Duration) {
        if let Some(handle) = self.step.take() {
            self.scheduler.cancel(handle);
        }
        self.step = Some(self.scheduler.schedule(period, Instant::now()));
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    fn poll(&mut self, now: Instant) -> Vec<Tick> {
        self.scheduler
            .fired(now)
            .into_iter()
            .filter_map(|handle| {
                if Some(handle) == self.step {
                    Some(Tick::Step)
                } else if Some(handle) == self.clock {
                    Some(Tick::Clock)
                } else {
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug)]
enum GameState {
    Idle,
    Running(Session),
    Paused(Session),
    Over(Session),
    Exit,
}

struct App {
    state: GameState,
    high_score: HighScore,
    grid: Option<Grid>,
    ticker: Ticker,
}

impl App {
    fn new() -> App {
        App {
            state: GameState::Idle,
            high_score: HighScore::load(),
            grid: None,
            ticker: Ticker::default(),
        }
    }

    fn new_run(grid: Option<Grid>, ticker: &mut Ticker) -> Option<GameState> {
        let Some(grid) = grid else {
            warn!("board has not been measured yet, ignoring start");
            return None;
        };
        let mut rng = rand::thread_rng();
        let session = Session::start(grid, &mut rng)?;
        ticker.start(session.step_period());
        info!("session started on a {0}x{0} board", grid.tiles());
        Some(GameState::Running(session))
    }

    fn render(&mut self, frame: &mut Frame) {
        let header_text = match &self.state {
            GameState::Running(s) | GameState::Paused(s) | GameState::Over(s) => {
                format!(
                    "SLITHER    High Score: {}    Score: {}    Level: {}    Time: {}",
                    self.high_score.best(),
                    s.score(),
                    s.level(),
                    s.elapsed_display()
                )
            }
            _ => {
                format!("SLITHER    High Score: {}", self.high_score.best())
            }
        };

        let size = frame.area();
        let layout = Layout::default()
            .direction(layout::Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title + counters
                Constraint::Min(0),    // Game area
            ])
            .split(size);

        frame.render_widget(
            Paragraph::new(header_text)
                .alignment(Alignment::Left)
                .block(Block::default().borders(Borders::ALL)),
            layout[0],
        );

        // Game area - different for each state
        match &self.state {
            GameState::Idle => {
                let block = Block::default().borders(Borders::ALL);
                let inner = block.inner(layout[1]);
                // The board is measured here, never while a run is going.
                self.grid = Some(Grid::fit(inner.width.min(inner.height), 1));
                frame.render_widget(
                    Paragraph::new("Press SPACE to start")
                        .alignment(Alignment::Center)
                        .block(block),
                    layout[1],
                );
            }
            GameState::Running(session) => {
                let block = Block::default().title("Playing").borders(Borders::ALL);
                let inner = block.inner(layout[1]);

                frame.render_widget(block, layout[1]);
                frame.render_widget(session, inner);
            }
            GameState::Paused(session) => {
                let block = Block::default()
                    .title("Paused. Press SPACE to continue")
                    .borders(Borders::ALL);
                let inner = block.inner(layout[1]);

                frame.render_widget(block, layout[1]);
                frame.render_widget(session, inner);
            }
            GameState::Over(session) => {
                let block = Block::default().borders(Borders::ALL);
                let inner = block.inner(layout[1]);

                frame.render_widget(block, layout[1]);
                frame.render_widget(session, inner);
                frame.render_widget(
                    Paragraph::new(format!(
                        "GAME OVER\nScore: {}   Level: {}   Time: {}\nPress SPACE to play again",
                        session.score(),
                        session.level(),
                        session.elapsed_display()
                    ))
                    .alignment(Alignment::Center),
                    inner,
                );
                self.grid = Some(Grid::fit(inner.width.min(inner.height), 1));
            }
            GameState::Exit => {}
        }
    }

    fn handle_key(&mut self, key: event::KeyEvent) {
        use event::KeyCode;

        let new_state = match &mut self.state {
            GameState::Idle => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(GameState::Exit),
                KeyCode::Char(' ') => Self::new_run(self.grid, &mut self.ticker),
                _ => None,
            },
            GameState::Running(session) => match key.code {
                KeyCode::Esc => Some(GameState::Exit),
                KeyCode::Char('q') => {
                    self.ticker.stop();
                    info!("run abandoned at score {}", session.score());
                    Some(GameState::Over(std::mem::take(session)))
                }
                KeyCode::Char(' ') => {
                    self.ticker.stop();
                    Some(GameState::Paused(std::mem::take(session)))
                }
                KeyCode::Up | KeyCode::Char('w') => {
                    session.request_direction(Direction::North);
                    None
                }
                KeyCode::Down | KeyCode::Char('s') => {
                    session.request_direction(Direction::South);
                    None
                }
                KeyCode::Left | KeyCode::Char('a') => {
                    session.request_direction(Direction::West);
                    None
                }
                KeyCode::Right | KeyCode::Char('d') => {
                    session.request_direction(Direction::East);
                    None
                }
                _ => None,
            },
            GameState::Paused(session) => match key.code {
                KeyCode::Esc => Some(GameState::Exit),
                KeyCode::Char('q') => Some(GameState::Over(std::mem::take(session))),
                KeyCode::Char(' ') => {
                    // Resume both ticks at their prior cadence.
                    self.ticker.start(session.step_period());
                    Some(GameState::Running(std::mem::take(session)))
                }
                _ => None,
            },
            GameState::Over(_) => match key.code {
                KeyCode::Esc => Some(GameState::Exit),
                KeyCode::Char(' ') => Self::new_run(self.grid, &mut self.ticker),
                KeyCode::Char('q') => Some(GameState::Idle),
                _ => None,
            },
            GameState::Exit => None,
        };

        if let Some(new_state) = new_state {
            self.state = new_state;
        }
    }

    fn on_tick(&mut self, tick: Tick) {
        match tick {
            Tick::Step => self.on_step(),
            Tick::Clock => {
                if let GameState::Running(session) = &mut self.state {
                    session.tick_second();
                }
            }
        }
    }

    fn on_step(&mut self) {
        let GameState::Running(session) = &mut self.state else {
            return;
        };

        let mut rng = rand::thread_rng();
        match session.step(&mut rng) {
            StepResult::Waiting | StepResult::Ongoing => {}
            StepResult::Nommed { new_period } => {
                self.high_score.submit(session.score());
                if let Some(period) = new_period {
                    self.ticker.retime_step(period);
                }
            }
            StepResult::Filled => {
                self.high_score.submit(session.score());
                info!("board filled, final score {}", session.score());
                let session = std::mem::take(session);
                self.ticker.stop();
                self.state = GameState::Over(session);
            }
            StepResult::Collision(kind) => {
                info!("game over ({:?}), final score {}", kind, session.score());
                let session = std::mem::take(session);
                self.ticker.stop();
                self.state = GameState::Over(session);
            }
        }
    }
}
