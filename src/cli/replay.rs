//! Replay command implementation.

use super::{CliError, ReplayFormat};
use formica::replay::{Recording, ReplayEngine, ReplayError};
use std::path::PathBuf;

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the replay fails.
pub(crate) fn execute(
    recording_path: PathBuf,
    format: ReplayFormat,
    ply: Option<u32>,
) -> Result<(), CliError> {
    let recording = Recording::load(&recording_path).map_err(|e| {
        CliError::new(format!(
            "Failed to load recording {}: {e}",
            recording_path.display()
        ))
    })?;

    let engine = if let Some(target_ply) = ply {
        ReplayEngine::new_at_ply(recording, target_ply)?
    } else {
        ReplayEngine::new(recording)?
    };

    match format {
        ReplayFormat::Tui => run_replay_tui(engine),
        ReplayFormat::Text => print_text_replay(engine),
    }
}

fn run_replay_tui(engine: ReplayEngine) -> Result<(), CliError> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Constraint, Direction, Layout},
        style::{Color, Modifier, Style},
        widgets::{Block, Borders, Paragraph, Wrap},
        Terminal,
    };
    use std::io::stdout;
    use std::time::Duration;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut engine = engine;

    loop {
        terminal
            .draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3),
                        Constraint::Min(10),
                        Constraint::Length(3),
                    ])
                    .split(f.area());

                let status = if engine.is_game_over() { "GAME OVER" } else { "REPLAY" };
                let title = format!(" Formica Replay | Ply {} | {status} ", engine.ply());
                let header = Paragraph::new(title)
                    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(header, chunks[0]);

                let summary = engine.render_text();
                let board_widget = Paragraph::new(summary)
                    .block(Block::default().borders(Borders::ALL).title(" Board "))
                    .wrap(Wrap { trim: false });
                f.render_widget(board_widget, chunks[1]);

                let controls = " [q] Quit  [\u{2190}/\u{2192}] Step  [r] Restart ";
                let footer = Paragraph::new(controls)
                    .style(Style::default().fg(Color::Gray))
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(footer, chunks[2]);
            })
            .map_err(|e| CliError::new(e.to_string()))?;

        if event::poll(Duration::from_millis(100)).map_err(|e| CliError::new(e.to_string()))? {
            if let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Right | KeyCode::Char('l') => {
                            let _ = engine.step_forward();
                        }
                        KeyCode::Left | KeyCode::Char('h') => {
                            let _ = engine.step_backward();
                        }
                        KeyCode::Char('r') => {
                            let _ = engine.goto_ply(0);
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

fn print_text_replay(mut engine: ReplayEngine) -> Result<(), CliError> {
    println!("Replay of recorded match");
    println!();

    loop {
        println!("=== Ply {} ===", engine.ply());
        println!("{}", engine.render_ascii());
        println!();

        if engine.is_game_over() {
            println!("=== GAME OVER ===");
            break;
        }

        if let Err(e) = engine.step_forward() {
            if matches!(e, ReplayError::GameOver) {
                println!("=== GAME OVER ===");
                break;
            }
            return Err(e.into());
        }
    }

    Ok(())
}
