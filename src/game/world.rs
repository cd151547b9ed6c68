//! # World Module
//!
//! Maps, fixtures, the message log and the [`World`] that owns every actor.

use crate::config;
use crate::game::{Actor, ActorId, Color, Item, MapId, Position};
use crate::generation::GenerationConfig;
use crate::utils::{serde_pairs, Grid};
use crate::{BurrowError, BurrowResult};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// Random number source owned by the world. Serializable so a loaded game
/// continues the same stream.
pub type WorldRng = ChaCha8Rng;

pub const STAIRS_DOWN: &str = "Stairs Down";
pub const STAIRS_UP: &str = "Stairs Up";

/// Terrain of a single map cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Wall,
    Floor,
}

impl Tile {
    pub fn is_walkable(self) -> bool {
        self == Tile::Floor
    }

    pub fn is_transparent(self) -> bool {
        self == Tile::Floor
    }

    /// Glyph used when this tile is drawn.
    pub fn glyph(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
        }
    }
}

/// Static, non-blocking decoration of a tile such as a staircase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub name: String,
    pub glyph: char,
    pub color: Color,
}

impl Fixture {
    pub fn new(name: impl Into<String>, glyph: char, color: Color) -> Self {
        Self {
            name: name.into(),
            glyph,
            color,
        }
    }

    pub fn stairs_down() -> Self {
        Self::new(STAIRS_DOWN, '>', Color::WHITE)
    }

    pub fn stairs_up() -> Self {
        Self::new(STAIRS_UP, '<', Color::WHITE)
    }
}

/// One dungeon level.
///
/// `explored` only ever goes from false to true; `visible` is rebuilt by every
/// field-of-view pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Map {
    pub id: MapId,
    pub tiles: Grid<Tile>,
    pub explored: Grid<bool>,
    pub visible: Grid<bool>,
    /// At most one fixture per tile
    #[serde(with = "serde_pairs")]
    pub fixtures: BTreeMap<Position, Fixture>,
    /// Several item stacks may share a tile; the first one is picked up first
    #[serde(with = "serde_pairs")]
    pub items: BTreeMap<Position, Vec<Item>>,
    /// Where a player arriving from the level above is placed
    pub entrance: Position,
}

impl Map {
    /// Creates a map of solid walls.
    pub fn new(id: MapId, width: i32, height: i32) -> Self {
        Self::from_tiles(id, Grid::new(width, height, Tile::Wall))
    }

    /// Wraps an existing tile grid, with nothing explored or visible yet.
    pub fn from_tiles(id: MapId, tiles: Grid<Tile>) -> Self {
        let (width, height) = (tiles.width(), tiles.height());
        Self {
            id,
            tiles,
            explored: Grid::new(width, height, false),
            visible: Grid::new(width, height, false),
            fixtures: BTreeMap::new(),
            items: BTreeMap::new(),
            entrance: Position::ZERO,
        }
    }

    /// Builds a map from rows of text: `#` is wall, anything else is floor.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Map, MapId, Position, Tile};
    ///
    /// let map = Map::from_rows(MapId::dungeon(1), &["###", "#.#", "###"]);
    /// assert_eq!(map.tiles.at(Position::new(1, 1)), Tile::Floor);
    /// assert_eq!(map.tiles.at(Position::new(0, 1)), Tile::Wall);
    /// ```
    pub fn from_rows(id: MapId, rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0) as i32;
        let mut tiles = Grid::new(width, height, Tile::Wall);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch != '#' {
                    tiles.set(Position::new(x as i32, y as i32), Tile::Floor);
                }
            }
        }
        Self::from_tiles(id, tiles)
    }

    pub fn width(&self) -> i32 {
        self.tiles.width()
    }

    pub fn height(&self) -> i32 {
        self.tiles.height()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        self.tiles.in_bounds(pos)
    }

    /// Out-of-bounds positions are never walkable.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tiles.get(pos).is_some_and(|tile| tile.is_walkable())
    }

    pub fn is_transparent(&self, pos: Position) -> bool {
        self.tiles.get(pos).is_some_and(|tile| tile.is_transparent())
    }

    pub fn is_visible(&self, pos: Position) -> bool {
        self.visible.at(pos)
    }

    pub fn is_explored(&self, pos: Position) -> bool {
        self.explored.at(pos)
    }

    pub fn fixture_at(&self, pos: Position) -> Option<&Fixture> {
        self.fixtures.get(&pos)
    }

    /// Position of the first fixture with the given name.
    pub fn find_fixture(&self, name: &str) -> Option<Position> {
        self.fixtures
            .iter()
            .find(|(_, fixture)| fixture.name == name)
            .map(|(pos, _)| *pos)
    }

    pub fn items_at(&self, pos: Position) -> &[Item] {
        self.items.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Drops an item stack on the floor.
    pub fn add_item(&mut self, pos: Position, item: Item) {
        self.items.entry(pos).or_default().push(item);
    }

    /// Removes and returns the first item stack at `pos`.
    pub fn take_first_item(&mut self, pos: Position) -> Option<Item> {
        let stacks = self.items.get_mut(&pos)?;
        if stacks.is_empty() {
            self.items.remove(&pos);
            return None;
        }
        let item = stacks.remove(0);
        if stacks.is_empty() {
            self.items.remove(&pos);
        }
        Some(item)
    }
}

/// A single line of the message log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub color: Color,
    /// How many consecutive times this text was logged
    pub count: u32,
}

impl Message {
    /// Text as displayed, with a repeat suffix when collapsed.
    pub fn display_text(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.text, self.count)
        } else {
            self.text.clone()
        }
    }
}

/// Append-only log shown to the player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    pub messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message; repeating the previous text bumps its count instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Color, MessageLog};
    ///
    /// let mut log = MessageLog::new();
    /// log.append("You wait.", Color::WHITE);
    /// log.append("You wait.", Color::WHITE);
    /// assert_eq!(log.messages.len(), 1);
    /// assert_eq!(log.messages[0].display_text(), "You wait. (x2)");
    /// ```
    pub fn append(&mut self, text: impl Into<String>, color: Color) {
        let text = text.into();
        if let Some(last) = self.messages.last_mut() {
            if last.text == text {
                last.count += 1;
                return;
            }
        }
        self.messages.push(Message {
            text,
            color,
            count: 1,
        });
    }

    pub fn last_text(&self) -> Option<&str> {
        self.messages.last().map(|msg| msg.text.as_str())
    }

    /// Whether any message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|msg| msg.text.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// The whole simulated game: every level, every actor, turn order, RNG and log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Every level generated so far, retained when inactive
    #[serde(with = "serde_pairs")]
    pub maps: HashMap<MapId, Map>,
    pub current_map_id: MapId,
    /// All actors on all maps
    pub actors: BTreeMap<ActorId, Actor>,
    /// Actors simulated on the current map
    pub active_actors: BTreeSet<ActorId>,
    /// Turn order; the player is always at the front
    pub schedule: VecDeque<ActorId>,
    pub rng: WorldRng,
    pub log: MessageLog,
    /// Settings used when a new level is generated
    pub generation: GenerationConfig,
    next_actor_id: u32,
}

impl World {
    /// Creates an empty world with no maps or actors.
    pub fn new(seed: u64, generation: GenerationConfig) -> Self {
        Self {
            maps: HashMap::new(),
            current_map_id: MapId::dungeon(1),
            actors: BTreeMap::new(),
            active_actors: BTreeSet::new(),
            schedule: VecDeque::new(),
            rng: WorldRng::seed_from_u64(seed),
            log: MessageLog::new(),
            generation,
            next_actor_id: ActorId::PLAYER.0 + 1,
        }
    }

    /// Hands out a fresh non-player actor id.
    pub fn allocate_actor_id(&mut self) -> ActorId {
        let id = ActorId(self.next_actor_id);
        self.next_actor_id += 1;
        id
    }

    /// Inserts an actor, activating it if it lives on the current map.
    pub fn add_actor(&mut self, actor: Actor) -> ActorId {
        let id = actor.id;
        if id.is_player() || actor.map_id == self.current_map_id {
            self.active_actors.insert(id);
        }
        self.next_actor_id = self.next_actor_id.max(id.0 + 1);
        self.actors.insert(id, actor);
        id
    }

    /// Adds a map to the world without switching to it.
    pub fn insert_map(&mut self, map: Map) {
        self.maps.insert(map.id.clone(), map);
    }

    /// Makes `id` the active map and rebuilds the active actor set.
    pub fn set_current_map(&mut self, id: MapId) -> BurrowResult<()> {
        if !self.maps.contains_key(&id) {
            return Err(BurrowError::InvalidState(format!("Map {} does not exist", id)));
        }
        self.current_map_id = id;
        self.refresh_active_actors();
        Ok(())
    }

    /// The player plus every actor residing on the current map.
    pub fn refresh_active_actors(&mut self) {
        self.active_actors = self
            .actors
            .values()
            .filter(|actor| actor.id.is_player() || actor.map_id == self.current_map_id)
            .map(|actor| actor.id)
            .collect();
    }

    pub fn map(&self, id: &MapId) -> BurrowResult<&Map> {
        self.maps
            .get(id)
            .ok_or_else(|| BurrowError::InvalidState(format!("Map {} does not exist", id)))
    }

    pub fn active_map(&self) -> BurrowResult<&Map> {
        self.map(&self.current_map_id)
    }

    pub fn active_map_mut(&mut self) -> BurrowResult<&mut Map> {
        let id = &self.current_map_id;
        self.maps
            .get_mut(id)
            .ok_or_else(|| BurrowError::InvalidState(format!("Map {} does not exist", id)))
    }

    pub fn actor(&self, id: ActorId) -> BurrowResult<&Actor> {
        self.actors
            .get(&id)
            .ok_or_else(|| BurrowError::InvalidState(format!("Actor {} not found", id)))
    }

    pub fn actor_mut(&mut self, id: ActorId) -> BurrowResult<&mut Actor> {
        self.actors
            .get_mut(&id)
            .ok_or_else(|| BurrowError::InvalidState(format!("Actor {} not found", id)))
    }

    pub fn player(&self) -> BurrowResult<&Actor> {
        self.actor(ActorId::PLAYER)
    }

    pub fn player_mut(&mut self) -> BurrowResult<&mut Actor> {
        self.actor_mut(ActorId::PLAYER)
    }

    /// Whether the player exists and still has hit points.
    pub fn player_is_alive(&self) -> bool {
        self.actors
            .get(&ActorId::PLAYER)
            .is_some_and(|player| player.stats.hp > 0)
    }

    /// Active actors in id order.
    pub fn active(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.active_actors
            .iter()
            .filter_map(move |id| self.actors.get(id))
    }

    /// The first active actor standing on `pos`.
    pub fn actor_at(&self, pos: Position) -> Option<ActorId> {
        self.active().find(|actor| actor.pos == pos).map(|actor| actor.id)
    }

    /// Every active actor standing on `pos`.
    pub fn actors_at(&self, pos: Position) -> Vec<ActorId> {
        self.active()
            .filter(|actor| actor.pos == pos)
            .map(|actor| actor.id)
            .collect()
    }

    /// Whether `pos` on the active map is currently in the player's view.
    pub fn is_visible(&self, pos: Position) -> bool {
        self.maps
            .get(&self.current_map_id)
            .is_some_and(|map| map.is_visible(pos))
    }

    /// Walkable terrain not occupied by an active actor.
    pub fn is_free(&self, pos: Position) -> bool {
        self.maps
            .get(&self.current_map_id)
            .is_some_and(|map| map.is_walkable(pos))
            && self.actor_at(pos).is_none()
    }

    /// Closest active actor to `origin` (squared distance) matching `filter`.
    pub fn nearest_actor<F>(&self, origin: Position, filter: F) -> Option<&Actor>
    where
        F: Fn(&Actor) -> bool,
    {
        self.active()
            .filter(|actor| filter(actor))
            .min_by_key(|actor| actor.pos.distance_squared(origin))
    }

    /// Logs `text` in the default color.
    pub fn message(&mut self, text: impl Into<String>) {
        self.log.append(text, config::TEXT_COLOR_DEFAULT);
    }
}
