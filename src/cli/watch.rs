//! Watch command implementation - Interactive TUI viewer.

#![allow(clippy::needless_pass_by_value)]

use super::CliError;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use formica::game::{Coord, GameConfig, Occupant, Outcome, Player};
use formica::replay::{Recording, ReplayEngine};
use formica::runner::config_for_seed;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::stdout;
use std::time::{Duration, Instant};

/// Execute the watch command.
///
/// # Errors
///
/// Returns an error if the TUI fails.
pub(crate) fn execute(
    config: GameConfig,
    seed: Option<u64>,
    speed: u64,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(super::series::wall_clock_seed);

    let recording = Recording::new(config_for_seed(&config, seed));
    let engine = ReplayEngine::new(recording)?;

    run_tui(engine, speed)
}

/// App state for the TUI.
struct App {
    engine: ReplayEngine,
    paused: bool,
    speed_ms: u64,
    last_step: Instant,
}

impl App {
    fn new(engine: ReplayEngine, speed_ms: u64) -> Self {
        Self {
            engine,
            paused: true, // Start paused
            speed_ms,
            last_step: Instant::now(),
        }
    }

    fn step_forward(&mut self) {
        if !self.engine.is_game_over() {
            let _ = self.engine.step_forward();
            self.last_step = Instant::now();
        }
    }

    fn step_backward(&mut self) {
        let _ = self.engine.step_backward();
        self.last_step = Instant::now();
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    fn increase_speed(&mut self) {
        self.speed_ms = self.speed_ms.saturating_sub(100).max(50);
    }

    fn decrease_speed(&mut self) {
        self.speed_ms = (self.speed_ms + 100).min(2000);
    }

    fn should_auto_step(&self) -> bool {
        !self.paused
            && !self.engine.is_game_over()
            && self.last_step.elapsed() >= Duration::from_millis(self.speed_ms)
    }
}

fn run_tui(engine: ReplayEngine, speed: u64) -> Result<(), CliError> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut app = App::new(engine, speed);

    loop {
        terminal
            .draw(|f| ui(f, &app))
            .map_err(|e| CliError::new(e.to_string()))?;

        if app.should_auto_step() {
            app.step_forward();
        }

        if event::poll(Duration::from_millis(50)).map_err(|e| CliError::new(e.to_string()))? {
            if let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char(' ') => app.toggle_pause(),
                        KeyCode::Right | KeyCode::Char('l') => {
                            app.paused = true;
                            app.step_forward();
                        }
                        KeyCode::Left | KeyCode::Char('h') => {
                            app.paused = true;
                            app.step_backward();
                        }
                        KeyCode::Char('+' | '=') => app.increase_speed(),
                        KeyCode::Char('-') => app.decrease_speed(),
                        KeyCode::Char('r') => {
                            let _ = app.engine.goto_ply(0);
                            app.paused = true;
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(10),    // Main content
            Constraint::Length(3),  // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[1]);

    render_board(f, main_chunks[0], app);
    render_stats(f, main_chunks[1], app);

    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let engine = app.engine.engine();
    let turn = engine.turn();

    let status = if app.engine.is_game_over() {
        "GAME OVER"
    } else if app.paused {
        "PAUSED"
    } else {
        "RUNNING"
    };

    let title = match engine.config().max_turns {
        Some(max) => format!(
            " Formica Viewer | Turn {turn}/{max} | {status} | Speed: {}ms ",
            app.speed_ms
        ),
        None => format!(
            " Formica Viewer | Turn {turn} | {status} | Speed: {}ms ",
            app.speed_ms
        ),
    };

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, area: Rect, app: &App) {
    let world = app.engine.engine().world();

    let mut lines: Vec<Line> = Vec::new();

    let visible_width = (usize::from(area.width).saturating_sub(4) / 2)
        .min(usize::from(world.width()));
    let visible_height = usize::from(area.height)
        .saturating_sub(2)
        .min(usize::from(world.height()));

    for y in 0..visible_height {
        let mut spans = Vec::new();
        for x in 0..visible_width {
            #[allow(clippy::cast_possible_truncation)]
            let pos = Coord::new(x as u16, y as u16);
            let (ch, color) = cell_char_color(app, pos);
            spans.push(Span::styled(ch, Style::default().fg(color)));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    let board_widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Board "));

    f.render_widget(board_widget, area);
}

fn cell_char_color(app: &App, pos: Coord) -> (String, Color) {
    let world = app.engine.engine().world();
    match world.occupant_at(pos) {
        Occupant::Ant(id) => world.ant(id).map_or_else(
            || ("?".to_string(), Color::White),
            |ant| {
                let ch = match (ant.owner, ant.carrying_food) {
                    (Player::One, false) => "a",
                    (Player::One, true) => "A",
                    (Player::Two, false) => "b",
                    (Player::Two, true) => "B",
                };
                (ch.to_string(), player_color(ant.owner))
            },
        ),
        Occupant::Food(_) => ("*".to_string(), Color::Yellow),
        Occupant::AnthillTile(owner) => ("\u{25b2}".to_string(), player_color(owner)),
        Occupant::Empty => (".".to_string(), Color::DarkGray),
    }
}

fn render_stats(f: &mut Frame, area: Rect, app: &App) {
    let engine = app.engine.engine();
    let world = engine.world();
    let mut lines = Vec::new();

    lines.push(Line::from(""));

    for player in Player::both() {
        let color = player_color(player);

        let ants = world.ant_count(player);
        let carriers = world
            .ants_of(player)
            .filter(|ant| ant.carrying_food)
            .count();
        let status = if ants == 0 { " [WIPED OUT]" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(
                format!("{player} "),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(status),
        ]));
        lines.push(Line::from(format!("  Ants: {ants}  Carrying: {carriers}")));
        lines.push(Line::from(format!("  Delivered: {}", engine.score(player))));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(format!(
        "Food on board: {}",
        world.food_remaining()
    )));
    match (engine.outcome(), engine.active_player()) {
        (Outcome::Ongoing, Some(player)) => {
            lines.push(Line::from(format!("To act: {player}")));
        }
        (outcome, _) => lines.push(Line::from(outcome.to_string())),
    }

    let stats_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Colonies "))
        .wrap(Wrap { trim: false });

    f.render_widget(stats_widget, area);
}

const fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Blue,
    }
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.engine.is_game_over() {
        " [q] Quit  [r] Restart  [\u{2190}/\u{2192}] Step "
    } else {
        " [q] Quit  [Space] Pause  [\u{2190}/\u{2192}] Step  [+/-] Speed  [r] Restart "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
