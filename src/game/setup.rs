//! Session setup: configuration, spawn layouts, and world construction.

use serde::{Deserialize, Serialize};

use crate::game::{Coord, GridWorld, Player};

/// Deterministic PRNG using xorshift64.
///
/// Spawn placement must be reproducible from a seed alone, so the engine
/// carries its own PRNG instead of depending on an external one.
#[derive(Debug, Clone, Copy)]
struct Rng {
    state: u64,
}

impl Rng {
    const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Random u16 in `[0, max)`.
    #[allow(clippy::cast_possible_truncation)]
    fn next_u16(&mut self, max: u16) -> u16 {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % u64::from(max)) as u16
    }

    /// Random u16 in `[lo, hi)`.
    fn range_u16(&mut self, lo: u16, hi: u16) -> u16 {
        lo + self.next_u16(hi - lo)
    }
}

/// Error raised when a configuration cannot produce a valid world.
#[derive(Debug, Clone)]
pub struct SetupError {
    /// Description of the error.
    pub reason: String,
}

impl SetupError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Setup error: {}", self.reason)
    }
}

impl std::error::Error for SetupError {}

/// A hand-authored spawn layout, used for deterministic fixtures.
///
/// Entities are placed in list order, which fixes their identities: test
/// fixtures rely on the first listed ant getting the first id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedLayout {
    /// Anthills as (owner, tile list).
    pub anthills: Vec<(Player, Vec<Coord>)>,
    /// Ants as (owner, cell).
    pub ants: Vec<(Player, Coord)>,
    /// Food cells.
    pub food: Vec<Coord>,
}

/// How the board is populated at setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    /// Seeded random spawn: each side's ants within its two home rows, food
    /// in the band between, anthills as single cells at the middle column
    /// of each home edge. Collisions are re-rolled.
    Random {
        /// Seed for the spawn PRNG.
        seed: u64,
    },
    /// Hand-authored coordinate lists.
    Fixed(FixedLayout),
}

/// Recognized setup options for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Grid width in cells.
    pub width: u16,
    /// Grid height in cells.
    pub height: u16,
    /// Starting ants per player (ignored for fixed layouts).
    pub ants_per_player: u32,
    /// Starting food items (ignored for fixed layouts).
    pub food_count: u32,
    /// Health each ant starts with.
    pub max_health: u32,
    /// Damage each ant deals per attack.
    pub attack_damage: u32,
    /// Turn count after which the game is decided on score, if set.
    pub max_turns: Option<u32>,
    /// Spawn layout mode.
    pub layout: Layout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            ants_per_player: 4,
            food_count: 8,
            max_health: 3,
            attack_damage: 1,
            max_turns: Some(50),
            layout: Layout::Random { seed: 0 },
        }
    }
}

impl GameConfig {
    /// The default configuration with a specific spawn seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            layout: Layout::Random { seed },
            ..Self::default()
        }
    }
}

/// Rows reserved at each player's home edge for their starting ants.
const HOME_ROWS: u16 = 2;

/// Build a populated world from a configuration.
///
/// # Errors
///
/// Returns an error if the grid is too small for the random bands, the
/// entity counts do not fit, or a fixed layout collides with itself.
pub(crate) fn build_world(config: &GameConfig) -> Result<GridWorld, SetupError> {
    let mut world = GridWorld::new(config.width, config.height)
        .ok_or_else(|| SetupError::new("grid dimensions must be non-zero"))?;

    match &config.layout {
        Layout::Random { seed } => populate_random(&mut world, config, *seed)?,
        Layout::Fixed(layout) => populate_fixed(&mut world, config, layout)?,
    }

    Ok(world)
}

fn populate_random(world: &mut GridWorld, config: &GameConfig, seed: u64) -> Result<(), SetupError> {
    let (width, height) = (config.width, config.height);
    if height < HOME_ROWS * 2 + 1 || width < 2 {
        return Err(SetupError::new(format!(
            "grid {width}x{height} is too small for random spawn bands"
        )));
    }
    // One anthill cell is unavailable per home band.
    let band_capacity = u32::from(width) * u32::from(HOME_ROWS) - 1;
    if config.ants_per_player == 0 {
        return Err(SetupError::new("each player needs at least one ant"));
    }
    if config.ants_per_player > band_capacity {
        return Err(SetupError::new(format!(
            "{} ants per player do not fit in a {}x{} home band",
            config.ants_per_player, width, HOME_ROWS
        )));
    }
    let food_capacity = u32::from(width) * u32::from(height - HOME_ROWS * 2);
    if config.food_count > food_capacity {
        return Err(SetupError::new(format!(
            "{} food items do not fit between the home bands",
            config.food_count
        )));
    }

    let mut rng = Rng::new(seed);

    // Anthills sit at the middle column of each home edge.
    let hill_column = width / 2;
    if !world.place_anthill(Player::One, vec![Coord::new(hill_column, 0)]) {
        return Err(SetupError::new("failed to place player 1 anthill"));
    }
    if !world.place_anthill(Player::Two, vec![Coord::new(hill_column, height - 1)]) {
        return Err(SetupError::new("failed to place player 2 anthill"));
    }

    // Player 1 ants in the bottom band, player 2 in the top band. Occupied
    // cells and anthill tiles are re-rolled, same as the food loop below.
    for player in Player::both() {
        let row_base = match player {
            Player::One => 0,
            Player::Two => height - HOME_ROWS,
        };
        for _ in 0..config.ants_per_player {
            loop {
                let pos = Coord::new(
                    rng.next_u16(width),
                    row_base + rng.next_u16(HOME_ROWS),
                );
                if world.ant_at(pos).is_some() || world.anthill_owner_at(pos).is_some() {
                    continue;
                }
                world
                    .place_ant(pos, player, config.max_health, config.attack_damage)
                    .ok_or_else(|| SetupError::new("failed to place ant"))?;
                break;
            }
        }
    }

    for _ in 0..config.food_count {
        loop {
            let pos = Coord::new(
                rng.next_u16(width),
                rng.range_u16(HOME_ROWS, height - HOME_ROWS),
            );
            if world.ant_at(pos).is_some() || world.food_at(pos).is_some() {
                continue;
            }
            world
                .place_food(pos)
                .ok_or_else(|| SetupError::new("failed to place food"))?;
            break;
        }
    }

    Ok(())
}

fn populate_fixed(
    world: &mut GridWorld,
    config: &GameConfig,
    layout: &FixedLayout,
) -> Result<(), SetupError> {
    for (owner, tiles) in &layout.anthills {
        if !world.place_anthill(*owner, tiles.clone()) {
            return Err(SetupError::new(format!(
                "invalid anthill tile list for {owner}: {tiles:?}"
            )));
        }
    }
    for &(owner, pos) in &layout.ants {
        world
            .place_ant(pos, owner, config.max_health, config.attack_damage)
            .ok_or_else(|| {
                SetupError::new(format!("cannot place {owner} ant at {pos:?}"))
            })?;
    }
    for &pos in &layout.food {
        world
            .place_food(pos)
            .ok_or_else(|| SetupError::new(format!("cannot place food at {pos:?}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_random_layout_counts() {
        let config = GameConfig::with_seed(42);
        let world = build_world(&config).expect("world");
        assert_eq!(world.ant_count(Player::One), 4);
        assert_eq!(world.ant_count(Player::Two), 4);
        assert_eq!(world.food_remaining(), 8);
        assert_eq!(world.anthills().len(), 2);
    }

    #[test]
    fn test_random_layout_is_deterministic() {
        let config = GameConfig::with_seed(7);
        let a = build_world(&config).expect("a");
        let b = build_world(&config).expect("b");
        let ants_a: Vec<_> = a.ants().map(|ant| (ant.owner, ant.pos)).collect();
        let ants_b: Vec<_> = b.ants().map(|ant| (ant.owner, ant.pos)).collect();
        assert_eq!(ants_a, ants_b);
        let food_a: Vec<_> = a.food_items().map(|f| f.pos).collect();
        let food_b: Vec<_> = b.food_items().map(|f| f.pos).collect();
        assert_eq!(food_a, food_b);
    }

    #[test]
    fn test_random_spawn_bands_respected() {
        let config = GameConfig::with_seed(99);
        let world = build_world(&config).expect("world");
        for ant in world.ants_of(Player::One) {
            assert!(ant.pos.y < HOME_ROWS, "P1 ant outside home band: {:?}", ant.pos);
        }
        for ant in world.ants_of(Player::Two) {
            assert!(
                ant.pos.y >= config.height - HOME_ROWS,
                "P2 ant outside home band: {:?}",
                ant.pos
            );
        }
        for food in world.food_items() {
            assert!(food.pos.y >= HOME_ROWS && food.pos.y < config.height - HOME_ROWS);
        }
    }

    #[test]
    fn test_too_many_ants_rejected() {
        let config = GameConfig {
            ants_per_player: 100,
            ..GameConfig::with_seed(1)
        };
        assert!(build_world(&config).is_err());
    }

    #[test]
    fn test_tiny_grid_rejected() {
        let config = GameConfig {
            width: 10,
            height: 4,
            ..GameConfig::with_seed(1)
        };
        assert!(build_world(&config).is_err());
    }

    #[test]
    fn test_fixed_layout_verbatim() {
        let layout = FixedLayout {
            anthills: vec![
                (Player::One, vec![Coord::new(5, 0)]),
                (Player::Two, vec![Coord::new(5, 9)]),
            ],
            ants: vec![
                (Player::One, Coord::new(0, 0)),
                (Player::One, Coord::new(2, 1)),
                (Player::Two, Coord::new(9, 9)),
            ],
            food: vec![Coord::new(4, 4), Coord::new(6, 5)],
        };
        let config = GameConfig {
            layout: Layout::Fixed(layout),
            ..GameConfig::default()
        };
        let world = build_world(&config).expect("world");
        assert!(world.ant_at(Coord::new(0, 0)).is_some());
        assert!(world.ant_at(Coord::new(2, 1)).is_some());
        assert!(world.ant_at(Coord::new(9, 9)).is_some());
        assert!(world.food_at(Coord::new(4, 4)).is_some());
        assert_eq!(world.anthill_owner_at(Coord::new(5, 0)), Some(Player::One));
    }

    #[test]
    fn test_fixed_layout_collision_rejected() {
        let layout = FixedLayout {
            anthills: Vec::new(),
            ants: vec![
                (Player::One, Coord::new(3, 3)),
                (Player::Two, Coord::new(3, 3)),
            ],
            food: Vec::new(),
        };
        let config = GameConfig {
            layout: Layout::Fixed(layout),
            ..GameConfig::default()
        };
        assert!(build_world(&config).is_err());
    }

    #[test]
    fn test_rng_zero_seed_does_not_stall() {
        let config = GameConfig::with_seed(0);
        let world = build_world(&config).expect("world");
        assert_eq!(world.ant_count(Player::One), 4);
    }
}
