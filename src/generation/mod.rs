//! # Generation Module
//!
//! Procedural content generation for dungeon levels, monsters and items.
//!
//! A level is built in three passes: [`RoomCorridorGenerator`] carves rooms
//! and corridors, [`EncounterGenerator`] and [`ItemGenerator`] populate every
//! room but the first, and [`generate_level`] ties the results into a [`Map`]
//! inside the [`World`].

pub mod dungeon;
pub mod encounters;
pub mod items;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::game::{scheduler, Actor, ActorId, Fixture, Item, Map, MapId, Position, WorldRng};
use crate::{config, BurrowError, BurrowResult, World};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Controls room layout and how densely rooms are populated. Stored in the
/// [`World`] so levels generated after a reload follow the same settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Map width in tiles
    pub map_width: i32,
    /// Map height in tiles
    pub map_height: i32,
    /// Minimum room size (including walls)
    pub min_room_size: i32,
    /// Maximum room size (including walls)
    pub max_room_size: i32,
    /// Minimum number of rooms attempted per level
    pub min_rooms: u32,
    /// Maximum number of rooms attempted per level
    pub max_rooms: u32,
    /// Probability of extra connections between rooms (0.0 to 1.0)
    pub extra_connection_chance: f64,
    /// `(from_level, cap)` pairs: most monsters a room may hold
    pub max_monsters_by_level: Vec<(i32, u32)>,
    /// `(from_level, cap)` pairs: most items a room may hold
    pub max_items_by_level: Vec<(i32, u32)>,
}

impl GenerationConfig {
    /// Creates the default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(42);
    /// assert!(config.min_room_size >= 3);
    /// assert!(config.max_room_size >= config.min_room_size);
    /// assert_eq!(config.max_monsters(1), 2);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            map_width: config::MAP_WIDTH,
            map_height: config::MAP_HEIGHT,
            min_room_size: 6,
            max_room_size: 12,
            min_rooms: 10,
            max_rooms: 30,
            extra_connection_chance: 0.15,
            max_monsters_by_level: vec![(1, 2), (4, 3), (6, 5)],
            max_items_by_level: vec![(1, 1), (4, 2)],
        }
    }

    /// Creates a configuration for testing with smaller, simpler levels.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            map_width: 40,
            map_height: 24,
            min_room_size: 5,
            max_room_size: 8,
            min_rooms: 4,
            max_rooms: 8,
            extra_connection_chance: 0.1,
            max_monsters_by_level: vec![(1, 1), (3, 2)],
            max_items_by_level: vec![(1, 1)],
        }
    }

    /// Most monsters a single room may hold on `level`.
    pub fn max_monsters(&self, level: i32) -> u32 {
        value_for_level(&self.max_monsters_by_level, level)
    }

    /// Most items a single room may hold on `level`.
    pub fn max_items(&self, level: i32) -> u32 {
        value_for_level(&self.max_items_by_level, level)
    }

    /// Checks that rooms of the maximum size fit on the map.
    pub fn validate(&self) -> BurrowResult<()> {
        if self.min_room_size < 3 || self.max_room_size < self.min_room_size {
            return Err(BurrowError::GenerationFailed(format!(
                "Invalid room size range {}..={}",
                self.min_room_size, self.max_room_size
            )));
        }
        if self.map_width < self.max_room_size + 4 || self.map_height < self.max_room_size + 4 {
            return Err(BurrowError::GenerationFailed(format!(
                "Map {}x{} too small for rooms up to {}",
                self.map_width, self.map_height, self.max_room_size
            )));
        }
        if self.min_rooms == 0 || self.max_rooms < self.min_rooms {
            return Err(BurrowError::GenerationFailed(format!(
                "Invalid room count range {}..={}",
                self.min_rooms, self.max_rooms
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// The value of the last `(from_level, value)` entry reached by `level`.
fn value_for_level(table: &[(i32, u32)], level: i32) -> u32 {
    table
        .iter()
        .filter(|(from, _)| *from <= level)
        .map(|(_, value)| *value)
        .last()
        .unwrap_or(0)
}

/// A rectangular room in the dungeon.
///
/// `width` and `height` include the surrounding walls; only the interior is
/// carved to floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier for this room
    pub id: u32,
    /// Top-left corner of the room
    pub top_left: Position,
    /// Width of the room (including walls)
    pub width: i32,
    /// Height of the room (including walls)
    pub height: i32,
    /// Rooms joined to this one by a corridor
    pub connections: Vec<u32>,
}

impl Room {
    /// Creates a new room.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Position, Room};
    ///
    /// let room = Room::new(1, Position::new(5, 5), 10, 8);
    /// assert_eq!(room.center(), Position::new(10, 9));
    /// assert!(room.contains(Position::new(7, 7)));
    /// assert!(!room.contains(Position::new(20, 20)));
    /// ```
    pub fn new(id: u32, top_left: Position, width: i32, height: i32) -> Self {
        Self {
            id,
            top_left,
            width,
            height,
            connections: Vec::new(),
        }
    }

    /// Gets the bottom-right corner of the room.
    pub fn bottom_right(&self) -> Position {
        Position::new(self.top_left.x + self.width - 1, self.top_left.y + self.height - 1)
    }

    /// Gets the center position of the room.
    pub fn center(&self) -> Position {
        Position::new(self.top_left.x + self.width / 2, self.top_left.y + self.height / 2)
    }

    /// Checks if a position is inside this room, walls included.
    pub fn contains(&self, pos: Position) -> bool {
        let bottom_right = self.bottom_right();
        pos.x >= self.top_left.x && pos.y >= self.top_left.y && pos.x <= bottom_right.x && pos.y <= bottom_right.y
    }

    /// Checks if this room overlaps with another room.
    pub fn overlaps(&self, other: &Room) -> bool {
        !(self.top_left.x >= other.top_left.x + other.width
            || other.top_left.x >= self.top_left.x + self.width
            || self.top_left.y >= other.top_left.y + other.height
            || other.top_left.y >= self.top_left.y + self.height)
    }

    /// Gets all floor positions within this room.
    pub fn floor_positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();
        for y in (self.top_left.y + 1)..(self.top_left.y + self.height - 1) {
            for x in (self.top_left.x + 1)..(self.top_left.x + self.width - 1) {
                positions.push(Position::new(x, y));
            }
        }
        positions
    }

    /// Records a corridor to another room.
    pub fn add_connection(&mut self, room_id: u32) {
        if !self.connections.contains(&room_id) {
            self.connections.push(room_id);
        }
    }
}

/// Trait for procedural content generators.
///
/// All generation systems implement this trait, so each pass of level
/// generation can be driven and validated the same way.
pub trait Generator<T> {
    /// Generates content using the world's random stream.
    fn generate(&self, config: &GenerationConfig, rng: &mut WorldRng) -> BurrowResult<T>;

    /// Validates generated content.
    fn validate(&self, content: &T, config: &GenerationConfig) -> BurrowResult<()>;

    /// Gets the generator type name for debugging.
    fn generator_type(&self) -> &'static str;
}

/// Generates dungeon level `level`, stores it in the world and makes it current.
///
/// The first room is left empty: it holds the entrance (and the up stairs below
/// level 1). The down stairs go in the last room.
pub fn generate_level(world: &mut World, level: i32) -> BurrowResult<MapId> {
    let config = world.generation.clone();
    let generator = RoomCorridorGenerator::new();
    let layout = generator.generate(&config, &mut world.rng)?;
    generator.validate(&layout, &config)?;

    let id = MapId::dungeon(level);
    let rooms = layout.rooms;
    let mut map = Map::from_tiles(id.clone(), layout.tiles);

    let first = rooms
        .first()
        .ok_or_else(|| BurrowError::GenerationFailed("Level has no rooms".to_string()))?;
    map.entrance = first.center();
    if level > 1 {
        map.fixtures.insert(first.center(), Fixture::stairs_up());
    }
    let stairs_down = match rooms.last() {
        Some(last) if rooms.len() > 1 => last.center(),
        _ => first
            .floor_positions()
            .into_iter()
            .find(|pos| *pos != first.center())
            .ok_or_else(|| BurrowError::GenerationFailed("No room for stairs".to_string()))?,
    };
    map.fixtures.insert(stairs_down, Fixture::stairs_down());

    world.insert_map(map);
    world.set_current_map(id.clone())?;

    let mut monsters = 0;
    let mut items = 0;
    for room in rooms.iter().skip(1) {
        let encounters = EncounterGenerator::new(room.clone(), level);
        let spawns = encounters.generate(&config, &mut world.rng)?;
        encounters.validate(&spawns, &config)?;
        debug!("{} rolled {} monsters for room {}", encounters.generator_type(), spawns.len(), room.id);
        for (kind, pos) in spawns {
            if world.is_free(pos) {
                let actor_id = world.allocate_actor_id();
                world.add_actor(kind.spawn(actor_id, id.clone(), pos));
                monsters += 1;
            }
        }

        let loot = ItemGenerator::new(room.clone(), level);
        let drops = loot.generate(&config, &mut world.rng)?;
        loot.validate(&drops, &config)?;
        debug!("{} rolled {} items for room {}", loot.generator_type(), drops.len(), room.id);
        let map = world.active_map_mut()?;
        for (kind, pos) in drops {
            map.add_item(pos, Item::new(kind));
            items += 1;
        }
    }

    info!(
        "Generated {} with {} rooms, {} monsters, {} items",
        id,
        rooms.len(),
        monsters,
        items
    );
    Ok(id)
}

/// Builds a fresh game: level 1, the player at its entrance, FOV computed.
pub fn new_world(generation: GenerationConfig) -> BurrowResult<World> {
    generation.validate()?;
    let mut world = World::new(generation.seed, generation);
    let map_id = generate_level(&mut world, 1)?;
    let start = world.map(&map_id)?.entrance;

    world.add_actor(Actor::player(map_id, start));
    world.schedule.push_back(ActorId::PLAYER);
    world.refresh_active_actors();
    scheduler::update_fov(&mut world)?;
    world.log.append(
        "Hello and welcome, adventurer, to yet another dungeon!",
        config::TEXT_COLOR_WELCOME,
    );
    debug!("New world seeded with {}", world.generation.seed);
    Ok(world)
}

/// Utility functions for generation.
pub mod utils {
    use super::*;
    use crate::game::Tile;
    use crate::utils::Grid;
    use std::collections::{HashSet, VecDeque};

    /// Validates that a tile grid has floor to stand on.
    pub fn validate_tiles(tiles: &Grid<Tile>) -> BurrowResult<()> {
        if !tiles.iter().any(|(_, tile)| tile.is_walkable()) {
            return Err(BurrowError::GenerationFailed(
                "Level has no floor tiles".to_string(),
            ));
        }
        Ok(())
    }

    /// Every walkable position reachable from `start` with 8-way steps.
    pub fn reachable_from(tiles: &Grid<Tile>, start: Position) -> HashSet<Position> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        if tiles.get(start).is_some_and(|tile| tile.is_walkable()) {
            visited.insert(start);
            queue.push_back(start);
        }

        while let Some(pos) = queue.pop_front() {
            for next in pos.adjacent_positions() {
                if !visited.contains(&next) && tiles.get(next).is_some_and(|tile| tile.is_walkable()) {
                    visited.insert(next);
                    queue.push_back(next);
                }
            }
        }
        visited
    }
}
