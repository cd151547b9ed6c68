//! # Dungeon Generation
//!
//! Room-and-corridor level layouts.
//!
//! Rooms are placed at random with collision detection, then each room is
//! joined to the previous one by an L-shaped corridor, with a few extra
//! corridors for loops.

use crate::game::{Position, Tile, WorldRng};
use crate::generation::{utils, GenerationConfig, Generator, Room};
use crate::utils::Grid;
use crate::{BurrowError, BurrowResult};
use log::debug;
use rand::Rng;
use std::collections::HashSet;

/// Carved terrain plus the rooms it was carved from, in placement order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub tiles: Grid<Tile>,
    pub rooms: Vec<Room>,
}

/// Primary dungeon generator using the room-and-corridor algorithm.
///
/// This generator creates layouts by:
/// 1. Placing rooms randomly with collision detection
/// 2. Connecting consecutive rooms with L-shaped corridors
/// 3. Adding a few extra corridors between random rooms
/// 4. Checking every room is reachable from the first
#[derive(Debug, Clone)]
pub struct RoomCorridorGenerator {
    /// Maximum attempts to place a room before giving up on it
    pub max_placement_attempts: u32,
    /// Whether to fail generation when a room is unreachable
    pub ensure_connectivity: bool,
}

impl RoomCorridorGenerator {
    /// Creates a new dungeon generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{GenerationConfig, Generator, RoomCorridorGenerator, WorldRng};
    /// use rand::SeedableRng;
    ///
    /// let generator = RoomCorridorGenerator::new();
    /// let config = GenerationConfig::for_testing(1);
    /// let layout = generator.generate(&config, &mut WorldRng::seed_from_u64(1)).unwrap();
    /// assert!(!layout.rooms.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            max_placement_attempts: 20,
            ensure_connectivity: true,
        }
    }

    /// Places rooms, carving each one as it is accepted.
    fn place_rooms(
        &self,
        tiles: &mut Grid<Tile>,
        config: &GenerationConfig,
        rng: &mut WorldRng,
    ) -> BurrowResult<Vec<Room>> {
        let mut rooms: Vec<Room> = Vec::new();
        let room_count = rng.gen_range(config.min_rooms..=config.max_rooms);

        for room_id in 0..room_count {
            if let Some(room) = self.try_place_room(config, rng, room_id, &rooms) {
                self.carve_room(tiles, &room);
                rooms.push(room);
            }
        }

        if rooms.is_empty() {
            return Err(BurrowError::GenerationFailed(
                "Failed to place any rooms".to_string(),
            ));
        }
        Ok(rooms)
    }

    /// Attempts to place a single room clear of all existing ones.
    fn try_place_room(
        &self,
        config: &GenerationConfig,
        rng: &mut WorldRng,
        room_id: u32,
        existing_rooms: &[Room],
    ) -> Option<Room> {
        for _ in 0..self.max_placement_attempts {
            let width = rng.gen_range(config.min_room_size..=config.max_room_size);
            let height = rng.gen_range(config.min_room_size..=config.max_room_size);
            let x = rng.gen_range(1..config.map_width - width);
            let y = rng.gen_range(1..config.map_height - height);
            let room = Room::new(room_id, Position::new(x, y), width, height);

            if !self.room_fits(config, &room) {
                continue;
            }
            if existing_rooms.iter().any(|existing| room.overlaps(existing)) {
                continue;
            }
            return Some(room);
        }
        None
    }

    /// Checks if a room lies inside the map, leaving the outer ring solid.
    fn room_fits(&self, config: &GenerationConfig, room: &Room) -> bool {
        let bottom_right = room.bottom_right();
        room.top_left.x >= 1
            && room.top_left.y >= 1
            && bottom_right.x < config.map_width - 1
            && bottom_right.y < config.map_height - 1
    }

    /// Carves out the interior of a room.
    fn carve_room(&self, tiles: &mut Grid<Tile>, room: &Room) {
        for pos in room.floor_positions() {
            tiles.set(pos, Tile::Floor);
        }
    }

    /// Connects rooms with corridors.
    fn connect_rooms(
        &self,
        tiles: &mut Grid<Tile>,
        rooms: &mut [Room],
        config: &GenerationConfig,
        rng: &mut WorldRng,
    ) {
        if rooms.len() < 2 {
            return;
        }

        for i in 0..(rooms.len() - 1) {
            let (start, end) = (rooms[i].center(), rooms[i + 1].center());
            self.carve_l_corridor(tiles, start, end, rng.gen_bool(0.5));

            let (a, b) = (rooms[i].id, rooms[i + 1].id);
            rooms[i].add_connection(b);
            rooms[i + 1].add_connection(a);
        }

        // Add some extra connections for variety
        let extra_connections = (rooms.len() as f64 * config.extra_connection_chance) as usize;
        for _ in 0..extra_connections {
            let first = rng.gen_range(0..rooms.len());
            let second = rng.gen_range(0..rooms.len());
            if first == second {
                continue;
            }
            let (start, end) = (rooms[first].center(), rooms[second].center());
            self.carve_l_corridor(tiles, start, end, rng.gen_bool(0.5));

            let (a, b) = (rooms[first].id, rooms[second].id);
            rooms[first].add_connection(b);
            rooms[second].add_connection(a);
        }
    }

    /// Carves an L-shaped corridor between two points.
    fn carve_l_corridor(&self, tiles: &mut Grid<Tile>, start: Position, end: Position, horizontal_first: bool) {
        let corner = if horizontal_first {
            Position::new(end.x, start.y)
        } else {
            Position::new(start.x, end.y)
        };
        self.carve_line(tiles, start, corner);
        self.carve_line(tiles, corner, end);
    }

    /// Carves a horizontal or vertical run of floor, inclusive.
    fn carve_line(&self, tiles: &mut Grid<Tile>, from: Position, to: Position) {
        for y in from.y.min(to.y)..=from.y.max(to.y) {
            for x in from.x.min(to.x)..=from.x.max(to.x) {
                tiles.set(Position::new(x, y), Tile::Floor);
            }
        }
    }

    /// Validates that all rooms are reachable from the first one, both through
    /// the recorded corridors and on the carved tiles.
    fn validate_connectivity(&self, tiles: &Grid<Tile>, rooms: &[Room]) -> BurrowResult<()> {
        let Some(first) = rooms.first() else {
            return Ok(());
        };
        if !self.ensure_connectivity {
            return Ok(());
        }

        let linked = linked_rooms(rooms, first.id);
        if let Some(room) = rooms.iter().find(|room| !linked.contains(&room.id)) {
            return Err(BurrowError::GenerationFailed(format!(
                "Room {} has no corridor path to room {}",
                room.id, first.id
            )));
        }

        let reachable = utils::reachable_from(tiles, first.center());
        for room in rooms {
            if room.floor_positions().iter().any(|pos| !reachable.contains(pos)) {
                return Err(BurrowError::GenerationFailed(format!(
                    "Room {} is not connected to other rooms",
                    room.id
                )));
            }
        }
        Ok(())
    }
}

/// Ids of every room reachable from `start` through recorded connections.
fn linked_rooms(rooms: &[Room], start: u32) -> HashSet<u32> {
    let mut linked = HashSet::from([start]);
    let mut frontier = vec![start];
    while let Some(id) = frontier.pop() {
        let Some(room) = rooms.iter().find(|room| room.id == id) else {
            continue;
        };
        for &next in &room.connections {
            if linked.insert(next) {
                frontier.push(next);
            }
        }
    }
    linked
}

impl Generator<Layout> for RoomCorridorGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut WorldRng) -> BurrowResult<Layout> {
        config.validate()?;
        let mut tiles = Grid::new(config.map_width, config.map_height, Tile::Wall);

        let mut rooms = self.place_rooms(&mut tiles, config, rng)?;
        self.connect_rooms(&mut tiles, &mut rooms, config, rng);
        self.validate_connectivity(&tiles, &rooms)?;

        debug!(
            "{} placed {} rooms on a {}x{} map",
            self.generator_type(),
            rooms.len(),
            config.map_width,
            config.map_height
        );
        Ok(Layout { tiles, rooms })
    }

    fn validate(&self, layout: &Layout, config: &GenerationConfig) -> BurrowResult<()> {
        if layout.tiles.width() != config.map_width || layout.tiles.height() != config.map_height {
            return Err(BurrowError::GenerationFailed(format!(
                "Layout is {}x{}, expected {}x{}",
                layout.tiles.width(),
                layout.tiles.height(),
                config.map_width,
                config.map_height
            )));
        }
        if layout.rooms.is_empty() {
            return Err(BurrowError::GenerationFailed("Layout has no rooms".to_string()));
        }
        utils::validate_tiles(&layout.tiles)
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}

impl Default for RoomCorridorGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_room_fits() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::for_testing(1);

        let good_room = Room::new(1, Position::new(5, 5), 8, 6);
        let bad_room = Room::new(2, Position::new(35, 20), 8, 6);
        assert!(generator.room_fits(&config, &good_room));
        assert!(!generator.room_fits(&config, &bad_room));
    }

    #[test]
    fn test_generation_with_small_level() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::for_testing(12345);
        let mut rng = WorldRng::seed_from_u64(config.seed);

        let layout = generator.generate(&config, &mut rng).unwrap();
        assert!(generator.validate(&layout, &config).is_ok());
        assert_eq!(layout.tiles.width(), config.map_width);
        assert_eq!(layout.tiles.height(), config.map_height);

        // Outer ring stays solid.
        for pos in layout.tiles.positions() {
            let edge = pos.x == 0 || pos.y == 0 || pos.x == config.map_width - 1 || pos.y == config.map_height - 1;
            if edge {
                assert_eq!(layout.tiles.at(pos), Tile::Wall);
            }
        }
        for (i, a) in layout.rooms.iter().enumerate() {
            for b in layout.rooms.iter().skip(i + 1) {
                assert!(!a.overlaps(b));
            }
        }
    }

    #[test]
    fn test_l_corridor_carving() {
        let generator = RoomCorridorGenerator::new();
        let mut tiles = Grid::new(20, 20, Tile::Wall);
        let start = Position::new(5, 5);
        let end = Position::new(15, 15);

        generator.carve_l_corridor(&mut tiles, start, end, true);
        assert_eq!(tiles.at(start), Tile::Floor);
        assert_eq!(tiles.at(Position::new(15, 5)), Tile::Floor);
        assert_eq!(tiles.at(end), Tile::Floor);
        assert_eq!(tiles.at(Position::new(5, 15)), Tile::Wall);
    }

    #[test]
    fn test_validation_rejects_empty_layout() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::for_testing(1);
        let layout = Layout {
            tiles: Grid::new(config.map_width, config.map_height, Tile::Wall),
            rooms: vec![Room::new(0, Position::new(1, 1), 5, 5)],
        };
        assert!(generator.validate(&layout, &config).is_err());
    }

    #[test]
    fn test_disconnected_rooms_detected() {
        let generator = RoomCorridorGenerator::new();
        let mut tiles = Grid::new(30, 12, Tile::Wall);
        let mut rooms = vec![
            Room::new(0, Position::new(1, 1), 5, 5),
            Room::new(1, Position::new(20, 1), 5, 5),
        ];
        for room in &rooms {
            generator.carve_room(&mut tiles, room);
        }
        rooms[0].add_connection(1);
        rooms[1].add_connection(0);
        assert!(generator.validate_connectivity(&tiles, &rooms).is_err());

        generator.carve_l_corridor(&mut tiles, rooms[0].center(), rooms[1].center(), true);
        assert!(generator.validate_connectivity(&tiles, &rooms).is_ok());
    }

    #[test]
    fn test_unrecorded_corridor_detected() {
        let generator = RoomCorridorGenerator::new();
        let mut tiles = Grid::new(30, 12, Tile::Wall);
        let rooms = vec![
            Room::new(0, Position::new(1, 1), 5, 5),
            Room::new(1, Position::new(20, 1), 5, 5),
        ];
        for room in &rooms {
            generator.carve_room(&mut tiles, room);
        }
        generator.carve_l_corridor(&mut tiles, rooms[0].center(), rooms[1].center(), true);
        assert!(generator.validate_connectivity(&tiles, &rooms).is_err());
    }

    #[test]
    fn test_generated_rooms_are_linked() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::for_testing(8);
        let layout = generator.generate(&config, &mut WorldRng::seed_from_u64(8)).unwrap();
        let linked = linked_rooms(&layout.rooms, layout.rooms[0].id);
        assert_eq!(linked.len(), layout.rooms.len());
        assert_eq!(generator.generator_type(), "RoomCorridorGenerator");
    }
}
