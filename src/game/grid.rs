//! Grid coordinates and the spatial entity registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::game::{Ant, Anthill, AntId, Food, FoodId, Player};

/// A cell coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another cell.
    #[must_use]
    pub const fn manhattan_distance(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) as u32 + self.y.abs_diff(other.y) as u32
    }

    /// Whether another cell is cardinally adjacent (Manhattan distance 1).
    #[must_use]
    pub const fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Cardinal neighbors in the fixed scan order up, down, left, right.
    ///
    /// The order is load-bearing: the scripted opponent scans neighbors in
    /// exactly this sequence, so changing it changes AI decisions.
    /// Returns a fixed-size array and count to avoid heap allocation; valid
    /// entries are at indices `0..count`.
    #[must_use]
    #[inline]
    pub fn neighbors(self, width: u16, height: u16) -> ([Coord; 4], u8) {
        let mut result = [Coord::new(0, 0); 4];
        let mut count = 0u8;

        if self.y > 0 {
            result[count as usize] = Coord::new(self.x, self.y - 1); // up
            count += 1;
        }
        if self.y + 1 < height {
            result[count as usize] = Coord::new(self.x, self.y + 1); // down
            count += 1;
        }
        if self.x > 0 {
            result[count as usize] = Coord::new(self.x - 1, self.y); // left
            count += 1;
        }
        if self.x + 1 < width {
            result[count as usize] = Coord::new(self.x + 1, self.y); // right
            count += 1;
        }

        (result, count)
    }
}

/// What a single cell holds, from the caller's point of view.
///
/// Ants, food and anthill tiles are mutually exclusive categories except
/// that an ant may stand on an anthill tile; in that case the ant is
/// reported, since it is the interactable occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    /// A live ant.
    Ant(AntId),
    /// A food item.
    Food(FoodId),
    /// A tile of the given player's anthill.
    AnthillTile(Player),
    /// Nothing.
    Empty,
}

/// Spatial registry of all live entities, keyed by coordinate.
///
/// The world exclusively owns every entity record. Occupancy queries are
/// answered from coordinate-keyed indices, so lookups are O(1) and always
/// reflect the latest committed mutation. Mutating accessors are crate
/// private: only the engine applies state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridWorld {
    width: u16,
    height: u16,
    /// Ant slots in creation order; `None` marks a removed ant. Slots are
    /// never reused, which keeps `AntId` stable for a whole session.
    ants: Vec<Option<Ant>>,
    ants_by_pos: HashMap<Coord, AntId>,
    /// Food slots in creation order; `None` marks consumed food.
    food: Vec<Option<Food>>,
    food_by_pos: HashMap<Coord, FoodId>,
    anthills: Vec<Anthill>,
    anthill_by_pos: HashMap<Coord, Player>,
}

impl GridWorld {
    /// Create an empty world. Returns `None` if either dimension is zero.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            width,
            height,
            ants: Vec::new(),
            ants_by_pos: HashMap::new(),
            food: Vec::new(),
            food_by_pos: HashMap::new(),
            anthills: Vec::new(),
            anthill_by_pos: HashMap::new(),
        })
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Whether a coordinate lies on the grid.
    #[must_use]
    pub const fn is_in_bounds(&self, pos: Coord) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// What the given cell holds. Out-of-bounds cells report `Empty`.
    #[must_use]
    pub fn occupant_at(&self, pos: Coord) -> Occupant {
        if let Some(&id) = self.ants_by_pos.get(&pos) {
            return Occupant::Ant(id);
        }
        if let Some(&id) = self.food_by_pos.get(&pos) {
            return Occupant::Food(id);
        }
        if let Some(&owner) = self.anthill_by_pos.get(&pos) {
            return Occupant::AnthillTile(owner);
        }
        Occupant::Empty
    }

    /// The ant standing on the given cell, if any.
    #[must_use]
    pub fn ant_at(&self, pos: Coord) -> Option<AntId> {
        self.ants_by_pos.get(&pos).copied()
    }

    /// The food item on the given cell, if any.
    #[must_use]
    pub fn food_at(&self, pos: Coord) -> Option<FoodId> {
        self.food_by_pos.get(&pos).copied()
    }

    /// The owner of the anthill tile at the given cell, if any.
    #[must_use]
    pub fn anthill_owner_at(&self, pos: Coord) -> Option<Player> {
        self.anthill_by_pos.get(&pos).copied()
    }

    /// Look up a live ant by id.
    #[must_use]
    pub fn ant(&self, id: AntId) -> Option<&Ant> {
        self.ants.get(id.slot()).and_then(Option::as_ref)
    }

    pub(crate) fn ant_mut(&mut self, id: AntId) -> Option<&mut Ant> {
        self.ants.get_mut(id.slot()).and_then(Option::as_mut)
    }

    /// Look up a food item by id.
    #[must_use]
    pub fn food(&self, id: FoodId) -> Option<&Food> {
        self.food.get(id.slot()).and_then(Option::as_ref)
    }

    /// All live ants in creation order.
    pub fn ants(&self) -> impl Iterator<Item = &Ant> {
        self.ants.iter().filter_map(Option::as_ref)
    }

    /// All live ants of one side in creation order.
    pub fn ants_of(&self, owner: Player) -> impl Iterator<Item = &Ant> {
        self.ants().filter(move |a| a.owner == owner)
    }

    /// Number of live ants a side has.
    #[must_use]
    pub fn ant_count(&self, owner: Player) -> u32 {
        self.ants_of(owner).count() as u32
    }

    /// All food items still on the board, in creation order.
    pub fn food_items(&self) -> impl Iterator<Item = &Food> {
        self.food.iter().filter_map(Option::as_ref)
    }

    /// Number of food items still on the board.
    #[must_use]
    pub fn food_remaining(&self) -> u32 {
        self.food_items().count() as u32
    }

    /// Number of live ants currently carrying food.
    #[must_use]
    pub fn carrying_count(&self) -> u32 {
        self.ants().filter(|a| a.carrying_food).count() as u32
    }

    /// All anthills, in authored order.
    #[must_use]
    pub fn anthills(&self) -> &[Anthill] {
        &self.anthills
    }

    /// A side's anthill, if it has one.
    #[must_use]
    pub fn anthill_of(&self, owner: Player) -> Option<&Anthill> {
        self.anthills.iter().find(|h| h.owner == owner)
    }

    /// Place a new ant. Fails (returns `None`, placing nothing) if the cell
    /// is out of bounds, already holds an ant, or holds food.
    pub(crate) fn place_ant(
        &mut self,
        pos: Coord,
        owner: Player,
        max_health: u32,
        attack_damage: u32,
    ) -> Option<AntId> {
        if !self.is_in_bounds(pos)
            || self.ants_by_pos.contains_key(&pos)
            || self.food_by_pos.contains_key(&pos)
        {
            return None;
        }
        let id = AntId(self.ants.len() as u32);
        self.ants
            .push(Some(Ant::new(id, owner, pos, max_health, attack_damage)));
        self.ants_by_pos.insert(pos, id);
        Some(id)
    }

    /// Place a new food item. Fails if the cell is out of bounds or already
    /// holds an ant, food, or an anthill tile.
    pub(crate) fn place_food(&mut self, pos: Coord) -> Option<FoodId> {
        if !self.is_in_bounds(pos)
            || self.ants_by_pos.contains_key(&pos)
            || self.food_by_pos.contains_key(&pos)
            || self.anthill_by_pos.contains_key(&pos)
        {
            return None;
        }
        let id = FoodId(self.food.len() as u32);
        self.food.push(Some(Food { id, pos }));
        self.food_by_pos.insert(pos, id);
        Some(id)
    }

    /// Register an anthill. Fails if any tile is out of bounds, duplicated,
    /// or already part of an anthill or under food.
    pub(crate) fn place_anthill(&mut self, owner: Player, tiles: Vec<Coord>) -> bool {
        if tiles.is_empty() {
            return false;
        }
        for (i, &tile) in tiles.iter().enumerate() {
            if !self.is_in_bounds(tile)
                || self.anthill_by_pos.contains_key(&tile)
                || self.food_by_pos.contains_key(&tile)
                || tiles[..i].contains(&tile)
            {
                return false;
            }
        }
        for &tile in &tiles {
            self.anthill_by_pos.insert(tile, owner);
        }
        self.anthills.push(Anthill { owner, tiles });
        true
    }

    /// Relocate a live ant to an empty-of-ants cell. The caller is expected
    /// to have checked legality; an illegal relocation is a no-op reported
    /// as `false`.
    pub(crate) fn relocate_ant(&mut self, id: AntId, to: Coord) -> bool {
        if !self.is_in_bounds(to) || self.ants_by_pos.contains_key(&to) {
            return false;
        }
        let Some(ant) = self.ants.get_mut(id.slot()).and_then(Option::as_mut) else {
            return false;
        };
        let from = ant.pos;
        ant.pos = to;
        let moved = self.ants_by_pos.remove(&from);
        debug_assert_eq!(moved, Some(id));
        self.ants_by_pos.insert(to, id);
        true
    }

    /// Clear the acted flag on every ant the given player owns.
    pub(crate) fn reset_actions(&mut self, owner: Player) {
        for ant in self
            .ants
            .iter_mut()
            .filter_map(Option::as_mut)
            .filter(|a| a.owner == owner)
        {
            ant.has_acted = false;
        }
    }

    /// Remove an ant from the world. Removing an ant that does not exist is
    /// a no-op reported as `false`.
    pub(crate) fn remove_ant(&mut self, id: AntId) -> bool {
        let Some(slot) = self.ants.get_mut(id.slot()) else {
            return false;
        };
        let Some(ant) = slot.take() else {
            return false;
        };
        let removed = self.ants_by_pos.remove(&ant.pos);
        debug_assert_eq!(removed, Some(id));
        true
    }

    /// Remove a food item from the world. Removing food that does not exist
    /// is a no-op reported as `false`.
    pub(crate) fn remove_food(&mut self, id: FoodId) -> bool {
        let Some(slot) = self.food.get_mut(id.slot()) else {
            return false;
        };
        let Some(item) = slot.take() else {
            return false;
        };
        let removed = self.food_by_pos.remove(&item.pos);
        debug_assert_eq!(removed, Some(id));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_neighbors_order() {
        let (adj, count) = Coord::new(5, 5).neighbors(10, 10);
        assert_eq!(count, 4);
        // Fixed scan order: up, down, left, right.
        assert_eq!(adj[0], Coord::new(5, 4));
        assert_eq!(adj[1], Coord::new(5, 6));
        assert_eq!(adj[2], Coord::new(4, 5));
        assert_eq!(adj[3], Coord::new(6, 5));
    }

    #[test]
    fn test_coord_neighbors_corner() {
        let (adj, count) = Coord::new(0, 0).neighbors(10, 10);
        let adj = &adj[..count as usize];
        assert_eq!(adj, &[Coord::new(0, 1), Coord::new(1, 0)]);
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(Coord::new(0, 0).manhattan_distance(Coord::new(3, 4)), 7);
        assert_eq!(Coord::new(3, 4).manhattan_distance(Coord::new(0, 0)), 7);
        assert!(Coord::new(2, 2).is_adjacent(Coord::new(2, 3)));
        assert!(!Coord::new(2, 2).is_adjacent(Coord::new(3, 3)));
        assert!(!Coord::new(2, 2).is_adjacent(Coord::new(2, 2)));
    }

    #[test]
    fn test_world_zero_size() {
        assert!(GridWorld::new(0, 10).is_none());
        assert!(GridWorld::new(10, 0).is_none());
    }

    #[test]
    fn test_place_and_query_ant() {
        let mut world = GridWorld::new(10, 10).expect("world");
        let pos = Coord::new(2, 3);
        let id = world.place_ant(pos, Player::One, 3, 1).expect("placed");
        assert_eq!(world.ant_at(pos), Some(id));
        assert_eq!(world.occupant_at(pos), Occupant::Ant(id));
        assert_eq!(world.ant(id).expect("ant").owner, Player::One);
    }

    #[test]
    fn test_no_two_ants_coincide() {
        let mut world = GridWorld::new(10, 10).expect("world");
        let pos = Coord::new(2, 3);
        world.place_ant(pos, Player::One, 3, 1).expect("placed");
        assert!(world.place_ant(pos, Player::Two, 3, 1).is_none());
        assert_eq!(world.ant_count(Player::Two), 0);
    }

    #[test]
    fn test_place_ant_out_of_bounds() {
        let mut world = GridWorld::new(10, 10).expect("world");
        assert!(world.place_ant(Coord::new(10, 0), Player::One, 3, 1).is_none());
    }

    #[test]
    fn test_no_two_food_coincide() {
        let mut world = GridWorld::new(10, 10).expect("world");
        let pos = Coord::new(4, 4);
        world.place_food(pos).expect("placed");
        assert!(world.place_food(pos).is_none());
        assert_eq!(world.food_remaining(), 1);
    }

    #[test]
    fn test_no_food_on_anthill_tile() {
        let mut world = GridWorld::new(10, 10).expect("world");
        assert!(world.place_anthill(Player::One, vec![Coord::new(5, 0)]));
        assert!(world.place_food(Coord::new(5, 0)).is_none());
    }

    #[test]
    fn test_anthill_block_layout() {
        let mut world = GridWorld::new(20, 15).expect("world");
        // 2x3 block of 6 cells.
        let tiles: Vec<Coord> = (0..2)
            .flat_map(|dx| (0..3).map(move |dy| Coord::new(9 + dx, dy)))
            .collect();
        assert!(world.place_anthill(Player::Two, tiles.clone()));
        for tile in tiles {
            assert_eq!(world.anthill_owner_at(tile), Some(Player::Two));
        }
    }

    #[test]
    fn test_relocate_updates_index() {
        let mut world = GridWorld::new(10, 10).expect("world");
        let from = Coord::new(1, 1);
        let to = Coord::new(1, 2);
        let id = world.place_ant(from, Player::One, 3, 1).expect("placed");
        assert!(world.relocate_ant(id, to));
        assert_eq!(world.ant_at(from), None);
        assert_eq!(world.ant_at(to), Some(id));
        assert_eq!(world.ant(id).expect("ant").pos, to);
    }

    #[test]
    fn test_relocate_onto_ant_rejected() {
        let mut world = GridWorld::new(10, 10).expect("world");
        let a = world.place_ant(Coord::new(1, 1), Player::One, 3, 1).expect("a");
        world.place_ant(Coord::new(1, 2), Player::Two, 3, 1).expect("b");
        assert!(!world.relocate_ant(a, Coord::new(1, 2)));
        assert_eq!(world.ant(a).expect("ant").pos, Coord::new(1, 1));
    }

    #[test]
    fn test_remove_missing_is_reported_noop() {
        let mut world = GridWorld::new(10, 10).expect("world");
        let id = world.place_ant(Coord::new(0, 0), Player::One, 3, 1).expect("placed");
        assert!(world.remove_ant(id));
        // Second removal of the same ant: consistent no-op.
        assert!(!world.remove_ant(id));
        assert!(!world.remove_food(FoodId(7)));
    }

    #[test]
    fn test_ant_ids_stable_after_removal() {
        let mut world = GridWorld::new(10, 10).expect("world");
        let a = world.place_ant(Coord::new(0, 0), Player::One, 3, 1).expect("a");
        let b = world.place_ant(Coord::new(1, 0), Player::One, 3, 1).expect("b");
        let c = world.place_ant(Coord::new(2, 0), Player::One, 3, 1).expect("c");
        world.remove_ant(b);
        let order: Vec<AntId> = world.ants_of(Player::One).map(|a| a.id).collect();
        assert_eq!(order, vec![a, c]);
        assert_eq!(world.ant(c).expect("ant").pos, Coord::new(2, 0));
    }

    #[test]
    fn test_occupant_ant_shadows_anthill() {
        let mut world = GridWorld::new(10, 10).expect("world");
        let pos = Coord::new(5, 0);
        assert!(world.place_anthill(Player::One, vec![pos]));
        let id = world.place_ant(pos, Player::One, 3, 1).expect("placed");
        assert_eq!(world.occupant_at(pos), Occupant::Ant(id));
        world.remove_ant(id);
        assert_eq!(world.occupant_at(pos), Occupant::AnthillTile(Player::One));
    }
}
