//! Play command implementation - interactive TUI game.

use super::CliError;
use super::presenter::TuiPresenter;
use super::render;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use outpost::config::{ConfigLoader, ConfigSource, LayoutConfig, load_rules};
use outpost::game::{Coord, Engine, GRID_SIZE, GameRules, Presenter, SeededDice};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the rules document is invalid or the TUI fails.
pub(crate) fn execute(
    grid_config: PathBuf,
    layout: PathBuf,
    rules: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<(), CliError> {
    let rules = match rules {
        Some(path) => load_rules(&path)?,
        None => GameRules::default(),
    };
    let seed = seed.unwrap_or_else(rand::random);
    info!(seed, "starting game");

    let loader = ConfigLoader::spawn(grid_config, layout);
    run_tui(App::new(rules, seed, loader))
}

/// App state for the TUI.
pub(crate) struct App {
    pub(crate) engine: Engine<TuiPresenter, SeededDice>,
    loader: ConfigLoader,
    pub(crate) layout: LayoutConfig,
    pub(crate) grid_source: Option<ConfigSource>,
    pub(crate) cursor: Coord,
    pub(crate) build_menu_open: bool,
    started: Instant,
    seed: u64,
}

impl App {
    fn new(rules: GameRules, seed: u64, loader: ConfigLoader) -> Self {
        let mut engine = Engine::new(rules, TuiPresenter::default(), SeededDice::new(seed));
        engine.refresh_all();
        engine
            .presenter_mut()
            .set_action_message("Loading configuration...");
        Self {
            engine,
            loader,
            layout: LayoutConfig::default(),
            grid_source: None,
            cursor: Coord::new(0, 0),
            build_menu_open: false,
            started: Instant::now(),
            seed,
        }
    }

    pub(crate) fn seed(&self) -> u64 {
        self.seed
    }

    /// Install configuration once the loader delivers it.
    fn poll_loader(&mut self) {
        if let Some(loaded) = self.loader.poll() {
            self.layout = loaded.layout;
            self.grid_source = Some(loaded.grid_source);
            self.engine.install_grid_config(loaded.grid);
        }
    }

    fn tick(&mut self) {
        self.poll_loader();
        self.engine.advance_clock(self.started.elapsed());
    }

    fn move_cursor(&mut self, dx: i8, dy: i8) {
        let step = |v: u8, d: i8| v.saturating_add_signed(d).min(GRID_SIZE - 1);
        self.cursor = Coord::new(step(self.cursor.x, dx), step(self.cursor.y, dy));
    }

    fn collect_at_cursor(&mut self) {
        // The map only takes clicks while a robot is out.
        if !self.engine.presenter().map_visible {
            if self.engine.is_config_ready() {
                self.engine
                    .presenter_mut()
                    .set_action_message("Deploy a robot to reveal the map");
            }
            return;
        }
        let _ = self.engine.collect_resources(self.cursor.x, self.cursor.y);
    }

    fn toggle_slot(&mut self, digit: char) {
        let slot = digit
            .to_digit(10)
            .and_then(|d| d.checked_sub(1))
            .and_then(|d| usize::try_from(d).ok());
        if let Some(slot) = slot {
            let _ = self.engine.toggle_robot(slot);
        }
    }

    fn build_refiner(&mut self) {
        if self.build_menu_open {
            let _ = self.engine.build_refiner();
        }
    }

    fn refine_steel(&mut self) {
        if self.build_menu_open {
            let _ = self.engine.refine_steel();
        }
    }

    fn new_game(&mut self) {
        let Some(grid) = self.engine.grid_config().cloned() else {
            return;
        };
        self.seed = self.seed.wrapping_add(1);
        info!(seed = self.seed, "new game");
        let rules = self.engine.rules().clone();
        let mut engine = Engine::new(rules, TuiPresenter::default(), SeededDice::new(self.seed));
        engine.install_grid_config(grid);
        self.engine = engine;
        self.build_menu_open = false;
    }
}

fn run_tui(mut app: App) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<(), CliError> {
    loop {
        app.tick();

        terminal
            .draw(|f| render::ui(f, app))
            .map_err(|e| CliError::new(e.to_string()))?;

        // Handle input with timeout
        if event::poll(Duration::from_millis(50)).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Left | KeyCode::Char('h') => app.move_cursor(-1, 0),
                KeyCode::Right | KeyCode::Char('l') => app.move_cursor(1, 0),
                KeyCode::Up | KeyCode::Char('k') => app.move_cursor(0, -1),
                KeyCode::Down | KeyCode::Char('j') => app.move_cursor(0, 1),
                KeyCode::Enter | KeyCode::Char(' ') => app.collect_at_cursor(),
                KeyCode::Char(c @ '1'..='9') => app.toggle_slot(c),
                KeyCode::Char('n') => {
                    let _ = app.engine.handle_next_day();
                }
                KeyCode::Char('b') => app.build_menu_open = !app.build_menu_open,
                KeyCode::Char('r') => app.build_refiner(),
                KeyCode::Char('s') => app.refine_steel(),
                KeyCode::Char('g') if app.engine.state().is_game_over() => app.new_game(),
                _ => {}
            }
        }
    }
    Ok(())
}

/// Grid configuration in use, for the header.
pub(crate) fn describe_source(source: Option<&ConfigSource>) -> String {
    match source {
        None => "loading".to_string(),
        Some(ConfigSource::Fallback) => "built-in grid".to_string(),
        Some(ConfigSource::File(path)) => path.display().to_string(),
    }
}
