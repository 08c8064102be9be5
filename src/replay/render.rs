//! ASCII renderer for terminal viewing with ANSI colors.

use crate::game::{Coord, Occupant, Outcome, Player, TurnEngine};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GRAY: &str = "\x1b[90m";
const YELLOW: &str = "\x1b[33m";

/// ANSI color codes per player (red, blue).
const PLAYER_COLORS: [&str; 2] = ["\x1b[31m", "\x1b[34m"];

/// Render the session to ASCII with ANSI colors.
///
/// Output format:
/// ```text
/// Turn 12/50   Player 1 to act          [P1: 3] [P2: 1]
/// ┌─────────────────────┐
/// │ . . ▲ a . . . . . . │
/// │ . A . . . * . . . . │
/// └─────────────────────┘
///
/// Legend: a/b=Ant  A/B=Carrying  *=Food  ▲=Anthill  .=Empty
/// ```
#[must_use]
pub fn render_ascii(engine: &TurnEngine) -> String {
    let mut output = String::new();

    render_header(&mut output, engine);
    render_board(&mut output, engine);

    output.push_str("\nLegend: a/b=Ant  A/B=Carrying  *=Food  \u{25b2}=Anthill  .=Empty\n");
    output.push_str("\n[<] Back  [>] Forward  [g] Goto ply  [q] Quit\n");

    output
}

fn render_header(output: &mut String, engine: &TurnEngine) {
    let turn = engine.turn();
    let status = match (engine.outcome(), engine.active_player()) {
        (Outcome::Ongoing, Some(player)) => format!("{player} to act"),
        (outcome, _) => outcome.to_string(),
    };

    let left = match engine.config().max_turns {
        Some(max) => format!("Turn {turn}/{max}   {status}"),
        None => format!("Turn {turn}   {status}"),
    };
    output.push_str(&left);

    let padding = 44usize.saturating_sub(left.len());
    for _ in 0..padding {
        output.push(' ');
    }

    for player in Player::both() {
        let color = player_color(player);
        let score = engine.score(player);
        output.push_str(&format!("{color}[P{}: {score}]{RESET} ", player.number()));
    }
    output.push('\n');
}

fn render_board(output: &mut String, engine: &TurnEngine) {
    let world = engine.world();
    let (width, height) = (world.width(), world.height());

    output.push('\u{250c}');
    for _ in 0..(usize::from(width) * 2 + 1) {
        output.push('\u{2500}');
    }
    output.push_str("\u{2510}\n");

    for y in 0..height {
        output.push_str("\u{2502} ");
        for x in 0..width {
            render_cell(output, engine, Coord::new(x, y));
            output.push(' ');
        }
        output.push_str("\u{2502}\n");
    }

    output.push('\u{2514}');
    for _ in 0..(usize::from(width) * 2 + 1) {
        output.push('\u{2500}');
    }
    output.push_str("\u{2518}\n");
}

fn render_cell(output: &mut String, engine: &TurnEngine, pos: Coord) {
    let world = engine.world();
    match world.occupant_at(pos) {
        Occupant::Ant(id) => {
            if let Some(ant) = world.ant(id) {
                let color = player_color(ant.owner);
                let symbol = ant_symbol(ant.owner, ant.carrying_food);
                let weight = if engine.selected() == Some(id) { BOLD } else { "" };
                output.push_str(&format!("{weight}{color}{symbol}{RESET}"));
            } else {
                output.push('?');
            }
        }
        Occupant::Food(_) => output.push_str(&format!("{YELLOW}*{RESET}")),
        Occupant::AnthillTile(owner) => {
            let color = player_color(owner);
            output.push_str(&format!("{color}\u{25b2}{RESET}"));
        }
        Occupant::Empty => output.push_str(&format!("{GRAY}.{RESET}")),
    }
}

/// Display character for an ant. Carriers are uppercased.
const fn ant_symbol(owner: Player, carrying: bool) -> char {
    match (owner, carrying) {
        (Player::One, false) => 'a',
        (Player::One, true) => 'A',
        (Player::Two, false) => 'b',
        (Player::Two, true) => 'B',
    }
}

const fn player_color(player: Player) -> &'static str {
    PLAYER_COLORS[player.index()]
}
